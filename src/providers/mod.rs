mod youtube;

use async_trait::async_trait;
use thiserror::Error;

pub use youtube::YouTubeProvider;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid Video ID: {video_id}")]
    InvalidVideoId { video_id: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Line printed to the operator when a fetch yields no value.
    pub fn diagnostic(&self) -> String {
        match self {
            FetchError::InvalidVideoId { .. } => format!("[ERROR] {}", self),
            _ => format!("[ERROR] Fetching views failed: {}", self),
        }
    }
}

#[async_trait]
pub trait ViewsProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_views(&self, video_id: &str) -> Result<u64, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_diagnostic() {
        let err = FetchError::InvalidVideoId {
            video_id: "nope".to_string(),
        };
        assert_eq!(err.diagnostic(), "[ERROR] Invalid Video ID: nope");
    }

    #[test]
    fn test_failure_diagnostic_includes_reason() {
        let err = FetchError::Parse("missing viewCount".to_string());
        assert_eq!(
            err.diagnostic(),
            "[ERROR] Fetching views failed: malformed response: missing viewCount"
        );
    }
}
