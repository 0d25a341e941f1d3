use regex::Regex;

use crate::config::Config;
use crate::models::moodmodel::{AnalysisResult, Mood, SongRecommendation};
use crate::service::error::ServiceError;

const GEMINI_MODEL: &str = "gemini-3-flash-preview";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct MoodAnalysisService {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl MoodAnalysisService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Asks the generative classifier for a mood, an explanation and three
    /// song suggestions. Unlike the sentiment stage this one is mandatory:
    /// a missing key or failed request fails the whole check-in. Only a
    /// reply that arrives but cannot be parsed degrades to the neutral
    /// fallback.
    pub async fn classify(
        &self,
        input: &str,
        sentiment_label: Option<&str>,
    ) -> Result<AnalysisResult, ServiceError> {
        let api_key = self.api_key.as_ref().ok_or(ServiceError::MissingCredential)?;

        let tone = sentiment_label.unwrap_or("Neutral");
        let prompt = format!(
            "The student said: \"{}\".\n\
             The preliminary sentiment analysis detected a \"{}\" tone.\n\n\
             1. Determine their primary mood from: [Happy, Stressed, Anxious, Sad, Neutral, Calm].\n\
             2. Provide a supportive explanation based on the input and sentiment.\n\
             3. Suggest 3 real songs (Artist - Title) that act as therapeutic counterparts to this specific mood.",
            input, tone
        );

        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "mood": { "type": "STRING" },
                        "explanation": { "type": "STRING" },
                        "recommendations": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": { "type": "STRING" },
                                    "artist": { "type": "STRING" }
                                },
                                "required": ["title", "artist"]
                            }
                        }
                    },
                    "required": ["mood", "explanation", "recommendations"]
                }
            }
        });

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, GEMINI_MODEL, api_key
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::MalformedResponse(format!(
                "classification endpoint answered {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ServiceError::MalformedResponse("reply carried no text part".to_string())
            })?;

        Ok(parse_analysis(text))
    }
}

/// Parses the model's JSON reply, tolerating a markdown code fence around
/// it. A reply that still fails to parse becomes the neutral fallback.
pub fn parse_analysis(text: &str) -> AnalysisResult {
    let trimmed = text.trim();
    let cleaned = if trimmed.starts_with("```json") {
        match Regex::new("```json|```") {
            Ok(fence) => fence.replace_all(trimmed, "").into_owned(),
            Err(_) => trimmed.to_string(),
        }
    } else {
        trimmed.to_string()
    };

    match serde_json::from_str::<AnalysisResult>(&cleaned) {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!("could not parse classification reply: {}", err);
            fallback_analysis()
        }
    }
}

pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        mood: Mood::Neutral,
        explanation: "I'm here for you.".to_string(),
        recommendations: vec![SongRecommendation {
            title: "Weightless".to_string(),
            artist: "Marconi Union".to_string(),
            youtube_url: None,
        }],
    }
}
