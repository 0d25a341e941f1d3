use thiserror::Error;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream response had no usable payload: {0}")]
    MalformedResponse(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        // Clients get the one generic analysis message; the cause stays in
        // the logs.
        tracing::error!("mood analysis pipeline failed: {}", error);
        HttpError::server_error(ErrorMessage::AnalysisFailed.to_string())
    }
}
