use crate::core::settings::Settings;
use crate::providers::{FetchError, ViewsProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const STATISTICS_PART: &str = "statistics";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct YouTubeProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl YouTubeProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        Self::new(
            settings.api.endpoint.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.api.timeout_secs),
        )
    }
}

#[async_trait]
impl ViewsProvider for YouTubeProvider {
    fn name(&self) -> &'static str {
        "YouTube Data API"
    }

    async fn fetch_views(&self, video_id: &str) -> Result<u64, FetchError> {
        tracing::debug!(video_id, endpoint = %self.endpoint, "Fetching view count");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("part", STATISTICS_PART),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: summarize_error_body(&body),
            });
        }

        let body = response.text().await?;
        parse_view_count(video_id, &body)
    }
}

fn parse_view_count(video_id: &str, body: &str) -> Result<u64, FetchError> {
    let parsed: VideoListResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let Some(item) = parsed.items.into_iter().next() else {
        return Err(FetchError::InvalidVideoId {
            video_id: video_id.to_string(),
        });
    };

    let raw = item.statistics.view_count;
    raw.trim()
        .parse::<u64>()
        .map_err(|e| FetchError::Parse(format!("viewCount {:?}: {}", raw, e)))
}

/// Google errors carry a JSON envelope; keep only its message, or the first
/// line of anything else.
fn summarize_error_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
        return parsed.error.message;
    }
    body.lines().next().unwrap_or_default().trim().to_string()
}
