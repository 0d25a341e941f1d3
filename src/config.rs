#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    // Upstream service credentials. Gemini is required for the analysis
    // stage to succeed; the other two degrade gracefully when absent.
    pub gemini_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub hf_api_token: Option<String>,
}

impl Config {
    pub fn init() -> Config {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        let data_dir = std::env::var("SENTIENCE_DATA_DIR")
            .unwrap_or_else(|_| "data".to_string());

        Config {
            port,
            data_dir,
            gemini_api_key: env_secret("GEMINI_API_KEY"),
            youtube_api_key: env_secret("YOUTUBE_API_KEY"),
            hf_api_token: env_secret("HF_API_TOKEN"),
        }
    }
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
