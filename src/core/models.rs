pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// One timed observation of a video's view count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub label: String,
    pub timestamp: String,
    pub total_views: u64,
    pub live_views: i64,
}

impl Checkpoint {
    pub fn new(label: &str, timestamp: String, total_views: u64, initial_views: u64) -> Self {
        Self {
            label: label.to_string(),
            timestamp,
            total_views,
            live_views: live_views(total_views, initial_views),
        }
    }

    /// The record file carries the label in its note column.
    pub fn note(&self) -> &str {
        &self.label
    }
}

/// Views gained since the initial checkpoint. Negative when the API revises
/// its count downwards. Saturates at the `i64` bounds.
pub fn live_views(total_views: u64, initial_views: u64) -> i64 {
    let delta = i128::from(total_views) - i128::from(initial_views);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

pub fn average_per_minute(live_views: i64, minutes: u32) -> f64 {
    if minutes == 0 {
        return 0.0;
    }
    live_views as f64 / f64::from(minutes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Aborted { at: &'static str },
}

/// The checkpoints recorded for one tracking run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub video_id: String,
    pub checkpoints: Vec<Checkpoint>,
}

impl Session {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            checkpoints: Vec::new(),
        }
    }

    pub fn initial_views(&self) -> Option<u64> {
        self.checkpoints.first().map(|c| c.total_views)
    }

    pub fn push(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
