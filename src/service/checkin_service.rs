use futures::future::join_all;

use crate::config::Config;
use crate::models::moodmodel::{AnalysisResult, SongRecommendation};
use crate::service::error::ServiceError;
use crate::service::mood_analysis::MoodAnalysisService;
use crate::service::sentiment::SentimentService;
use crate::service::video_search::VideoSearchService;

#[derive(Debug, Clone)]
pub struct CheckInService {
    sentiment: SentimentService,
    analysis: MoodAnalysisService,
    videos: VideoSearchService,
}

impl CheckInService {
    pub fn new(config: &Config) -> Self {
        Self {
            sentiment: SentimentService::new(config),
            analysis: MoodAnalysisService::new(config),
            videos: VideoSearchService::new(config),
        }
    }

    /// The three-stage pipeline behind one submitted check-in. Stages run
    /// strictly in order: tone first, classification second, link lookups
    /// last. Only the classification stage can fail the pipeline.
    pub async fn run(&self, input: &str, rating: u8) -> Result<AnalysisResult, ServiceError> {
        let sentiment = self
            .sentiment
            .analyze(&sentiment_input(input, rating))
            .await;
        let label = sentiment.as_ref().map(|s| s.label.as_str());

        let mut analysis = self
            .analysis
            .classify(&classifier_input(input, rating), label)
            .await?;

        // Fan the lookups out together and take whatever settled; one slow
        // or failed search never holds the others hostage.
        let queries: Vec<String> = analysis
            .recommendations
            .iter()
            .map(|song| format!("{} {} official", song.artist, song.title))
            .collect();
        let urls = join_all(queries.iter().map(|q| self.videos.search_song(q))).await;

        attach_urls(&mut analysis.recommendations, urls);

        Ok(analysis)
    }
}

/// Empty reflections still give the sentiment stage something to read.
fn sentiment_input(input: &str, rating: u8) -> String {
    if input.is_empty() {
        format!("Rating {}/5", rating)
    } else {
        input.to_string()
    }
}

/// The classifier gets a differently phrased stand-in for empty input.
fn classifier_input(input: &str, rating: u8) -> String {
    if input.is_empty() {
        format!("Mood Rating: {}", rating)
    } else {
        input.to_string()
    }
}

fn attach_urls(recommendations: &mut [SongRecommendation], urls: Vec<Option<String>>) {
    for (song, url) in recommendations.iter_mut().zip(urls) {
        song.youtube_url = url;
    }
}
