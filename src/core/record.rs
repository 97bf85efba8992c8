use crate::core::models::Checkpoint;
use crate::core::settings::LoggingSettings;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub const HEADER: [&str; 4] = ["Timestamp", "Total Views", "Live Views", "Note"];

/// Flat CSV record of a tracking session. Every call opens and closes the
/// file; nothing is held between writes.
#[derive(Debug, Clone)]
pub struct RecordLog {
    path: PathBuf,
    enabled: bool,
}

impl RecordLog {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }

    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self::new(settings.file.clone(), settings.enabled)
    }

    #[allow(dead_code)]
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    /// Truncates the file and writes the header row.
    pub fn init(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut file = File::create(&self.path)
            .with_context(|| format!("Failed to create record file: {}", self.path.display()))?;
        write_row(&mut file, &HEADER)
            .with_context(|| format!("Failed to write header to {}", self.path.display()))?;

        tracing::info!(path = ?self.path, "Initialized record file");
        Ok(())
    }

    pub fn append(
        &self,
        timestamp: &str,
        total_views: u64,
        live_views: i64,
        note: &str,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open record file: {}", self.path.display()))?;

        let total = total_views.to_string();
        let live = live_views.to_string();
        write_row(&mut file, &[timestamp, &total, &live, note])
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;

        tracing::debug!(path = ?self.path, timestamp, total_views, live_views, "Appended record");
        Ok(())
    }

    pub fn append_checkpoint(&self, checkpoint: &Checkpoint) -> Result<()> {
        self.append(
            &checkpoint.timestamp,
            checkpoint.total_views,
            checkpoint.live_views,
            checkpoint.note(),
        )
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    // CSV rows end in CRLF.
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    writer.flush()
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
