use crate::config::Config;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Debug, Clone)]
pub struct VideoSearchService {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl VideoSearchService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.youtube_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolves a free-text query to the first matching watch URL.
    /// Misses and failures are both None; a song without a link is fine.
    pub async fn search_song(&self, query: &str) -> Option<String> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::warn!("YOUTUBE_API_KEY is missing, song links will be absent");
                return None;
            }
        };

        let url = format!(
            "{}?part=snippet&maxResults=1&q={}&type=video&key={}",
            SEARCH_URL,
            urlencoding::encode(query),
            api_key
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("video search failed: {}", err);
                return None;
            }
        };

        let data: serde_json::Value = match response.json().await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("video search response was not JSON: {}", err);
                return None;
            }
        };

        let video_id = data["items"][0]["id"]["videoId"].as_str()?;
        Some(format!("https://www.youtube.com/watch?v={}", video_id))
    }
}
