use crate::core::models::TIMESTAMP_FORMAT;
use async_trait::async_trait;
use chrono::Local;
use std::time::Duration;

/// Source of wall-clock timestamps and the waits between checkpoints.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
    fn timestamp(&self) -> String;
}

pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}
