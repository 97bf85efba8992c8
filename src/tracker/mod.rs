mod clock;
mod schedule;

use crate::core::models::{average_per_minute, Checkpoint, Session, SessionOutcome};
use crate::core::record::RecordLog;
use crate::providers::ViewsProvider;
use anyhow::Result;
use std::io::Write;

pub use clock::{Clock, SystemClock};
pub use schedule::{CheckpointSpec, DEFAULT_SCHEDULE};

const RULE_WIDTH: usize = 60;

/// Walks a checkpoint schedule for one video, printing every checkpoint to
/// `out` and appending it to the record file.
///
/// A failed fetch ends the run at that checkpoint. Rows already written stay
/// in the record file. Record and output write errors are returned.
pub struct Tracker<'a, W: Write> {
    provider: &'a dyn ViewsProvider,
    clock: &'a dyn Clock,
    record: &'a RecordLog,
    schedule: &'a [CheckpointSpec],
    out: W,
}

impl<'a, W: Write> Tracker<'a, W> {
    pub fn new(
        provider: &'a dyn ViewsProvider,
        clock: &'a dyn Clock,
        record: &'a RecordLog,
        out: W,
    ) -> Self {
        Self {
            provider,
            clock,
            record,
            schedule: &DEFAULT_SCHEDULE,
            out,
        }
    }

    #[allow(dead_code)]
    pub fn with_schedule(mut self, schedule: &'a [CheckpointSpec]) -> Self {
        self.schedule = schedule;
        self
    }

    #[allow(dead_code)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, video_id: &str) -> Result<(Session, SessionOutcome)> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "       📊 YOUTUBE LIVE VIEWS TRACKER")?;
        writeln!(self.out, "{}", rule)?;

        tracing::info!(video_id, provider = self.provider.name(), "Starting tracking session");

        let mut session = Session::new(video_id);

        for spec in self.schedule {
            if !spec.wait_before.is_zero() {
                writeln!(self.out)?;
                writeln!(self.out, "{}", spec.wait_message)?;
                self.out.flush()?;
                self.clock.sleep(spec.wait_before).await;
            }

            let total_views = match self.provider.fetch_views(video_id).await {
                Ok(views) => views,
                Err(e) => {
                    writeln!(self.out, "{}", e.diagnostic())?;
                    tracing::warn!(
                        video_id,
                        checkpoint = spec.label,
                        error = %e,
                        "Aborting session"
                    );
                    return Ok((session, SessionOutcome::Aborted { at: spec.label }));
                }
            };

            let initial_views = session.initial_views().unwrap_or(total_views);
            let checkpoint = Checkpoint::new(
                spec.label,
                self.clock.timestamp(),
                total_views,
                initial_views,
            );

            self.report(spec, &checkpoint)?;
            self.record.append_checkpoint(&checkpoint)?;
            session.push(checkpoint);
        }

        writeln!(self.out)?;
        writeln!(self.out, "✅ Tracking Finished Successfully.")?;
        writeln!(self.out, "{}", rule)?;

        tracing::info!(
            video_id = %session.video_id,
            checkpoints = session.len(),
            "Tracking session finished"
        );
        Ok((session, SessionOutcome::Completed))
    }

    fn report(&mut self, spec: &CheckpointSpec, checkpoint: &Checkpoint) -> Result<()> {
        if spec.is_initial() {
            writeln!(
                self.out,
                "[{}] Initial Views: {}",
                checkpoint.timestamp, checkpoint.total_views
            )?;
        } else {
            writeln!(
                self.out,
                "[{}] Views after {} min: {} | Live {} min views = {}",
                checkpoint.timestamp,
                spec.elapsed_minutes,
                checkpoint.total_views,
                spec.elapsed_minutes,
                checkpoint.live_views
            )?;
        }

        if let Some(minutes) = spec.average_over_minutes {
            writeln!(
                self.out,
                "📈 Average per 1 min views (till {} min) = {:.2}",
                minutes,
                average_per_minute(checkpoint.live_views, minutes)
            )?;
        }

        self.out.flush()?;
        Ok(())
    }
}
