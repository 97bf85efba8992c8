use crate::core::record::RecordLog;
use crate::core::settings::Settings;
use crate::providers::{FetchError, YouTubeProvider};
use crate::tracker::{SystemClock, Tracker};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = "🎥 Enter YouTube Video ID: ";

pub async fn run(video_id: Option<String>, no_log: bool, output: Option<PathBuf>) -> Result<()> {
    let mut settings = Settings::load()?;
    apply_overrides(&mut settings, no_log, output);
    settings.validate()?;

    let video_id = match video_id {
        Some(id) => id.trim().to_string(),
        None => prompt_video_id(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let record = RecordLog::from_settings(&settings.logging);
    if !prepare_record(&record, &video_id, &mut io::stdout())? {
        return Ok(());
    }

    let provider =
        YouTubeProvider::from_settings(&settings).context("Failed to build HTTP client")?;

    let clock = SystemClock;
    let mut tracker = Tracker::new(&provider, &clock, &record, io::stdout());
    let (session, outcome) = tracker.run(&video_id).await?;

    tracing::debug!(?outcome, checkpoints = session.len(), "Session ended");
    Ok(())
}

fn apply_overrides(settings: &mut Settings, no_log: bool, output: Option<PathBuf>) {
    if no_log {
        settings.logging.enabled = false;
    }
    if let Some(path) = output {
        settings.logging.file = path;
    }
}

/// Starts a fresh record file. A blank video ID is reported like an unknown
/// one and ends the run before any request; returns whether tracking proceeds.
fn prepare_record<W: Write>(record: &RecordLog, video_id: &str, out: &mut W) -> Result<bool> {
    record.init()?;

    if video_id.is_empty() {
        let err = FetchError::InvalidVideoId {
            video_id: String::new(),
        };
        writeln!(out, "{}", err.diagnostic())?;
        tracing::warn!("Empty video ID, nothing to track");
        return Ok(false);
    }

    Ok(true)
}

fn prompt_video_id<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read video ID")?;
    if read == 0 {
        anyhow::bail!("No video ID provided");
    }

    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_prompt_trims_input() {
        let mut input = Cursor::new("  dQw4w9WgXcQ \n");
        let mut out = Vec::new();

        let id = prompt_video_id(&mut input, &mut out).unwrap();

        assert_eq!(id, "dQw4w9WgXcQ");
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(prompt_video_id(&mut input, &mut out).is_err());
    }

    #[test]
    fn test_blank_id_resets_record_and_reports() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "Timestamp,Total Views,Live Views,Note\r\nOLD,1,0,Initial\r\n")
            .unwrap();
        let record = RecordLog::new(&path, true);
        let mut out = Vec::new();

        let proceed = prepare_record(&record, "", &mut out).unwrap();

        assert!(!proceed);
        assert_eq!(String::from_utf8(out).unwrap(), "[ERROR] Invalid Video ID: \n");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Timestamp,Total Views,Live Views,Note\r\n");
    }

    #[test]
    fn test_valid_id_proceeds_after_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let record = RecordLog::new(&path, true);
        let mut out = Vec::new();

        assert!(prepare_record(&record, "dQw4w9WgXcQ", &mut out).unwrap());
        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn test_run_with_blank_id_exits_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "OLD,1,0,Initial\r\n").unwrap();

        run(Some("   ".to_string()), false, Some(path.clone()))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Timestamp,Total Views,Live Views,Note\r\n");
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, false, Some(PathBuf::from("run.csv")));
        assert!(settings.logging.enabled);
        assert_eq!(settings.logging.file, PathBuf::from("run.csv"));

        apply_overrides(&mut settings, true, None);
        assert!(!settings.logging.enabled);
        assert_eq!(settings.logging.file, PathBuf::from("run.csv"));
    }
}
