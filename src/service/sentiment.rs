use serde::{Deserialize, Serialize};

use crate::config::Config;

const SENTIMENT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SentimentScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SentimentService {
    api_token: Option<String>,
    client: reqwest::Client,
}

impl SentimentService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_token: config.hf_api_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Best effort: a missing token, transport failure or odd payload all
    /// come back as None and the check-in carries on without a tone hint.
    pub async fn analyze(&self, text: &str) -> Option<SentimentScore> {
        let token = match &self.api_token {
            Some(token) => token,
            None => {
                tracing::warn!("HF_API_TOKEN is missing, skipping sentiment analysis");
                return None;
            }
        };

        let payload = serde_json::json!({ "inputs": text });

        let response = match self
            .client
            .post(SENTIMENT_MODEL_URL)
            .header("Authorization", format!("Bearer {}", token))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("sentiment request failed: {}", err);
                return None;
            }
        };

        let result: serde_json::Value = match response.json().await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("sentiment response was not JSON: {}", err);
                return None;
            }
        };

        // The inference API returns an array of arrays for this model:
        // [[{label: 'POSITIVE', score: 0.99}]]
        let first = &result[0][0];
        match (first["label"].as_str(), first["score"].as_f64()) {
            (Some(label), Some(score)) => Some(SentimentScore {
                label: label.to_string(),
                score,
            }),
            _ => {
                tracing::warn!("sentiment response carried no label/score pair");
                None
            }
        }
    }
}
