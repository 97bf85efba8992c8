use crate::core::settings::Settings;
use crate::providers::{ViewsProvider, YouTubeProvider};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct ViewsOutput {
    video_id: String,
    views: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    fetched_at: DateTime<Utc>,
}

pub async fn run(video_id: String, json: bool) -> Result<()> {
    let settings = Settings::load()?;
    settings.validate()?;

    let video_id = video_id.trim().to_string();
    if video_id.is_empty() {
        anyhow::bail!("Video ID must not be empty");
    }

    let provider =
        YouTubeProvider::from_settings(&settings).context("Failed to build HTTP client")?;

    let views = provider
        .fetch_views(&video_id)
        .await
        .with_context(|| format!("Failed to fetch views for {}", video_id))?;

    let output = ViewsOutput {
        video_id,
        views,
        fetched_at: Utc::now(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}: {} views", output.video_id, output.views);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_output_shape() {
        let output = ViewsOutput {
            video_id: "dQw4w9WgXcQ".to_string(),
            views: 1_234,
            fetched_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };

        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "video_id": "dQw4w9WgXcQ",
                "views": 1234,
                "fetched_at": 1_700_000_000,
            })
        );
    }
}
