use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointSpec {
    pub label: &'static str,
    /// Minutes since the initial checkpoint once this one is reached.
    pub elapsed_minutes: u32,
    pub wait_before: Duration,
    pub wait_message: &'static str,
    /// Print the per-minute average of live views over this many minutes.
    /// The average is never written to the record file.
    pub average_over_minutes: Option<u32>,
}

impl CheckpointSpec {
    pub fn is_initial(&self) -> bool {
        self.elapsed_minutes == 0
    }
}

pub const DEFAULT_SCHEDULE: [CheckpointSpec; 4] = [
    CheckpointSpec {
        label: "Initial",
        elapsed_minutes: 0,
        wait_before: Duration::ZERO,
        wait_message: "",
        average_over_minutes: None,
    },
    CheckpointSpec {
        label: "1 min",
        elapsed_minutes: 1,
        wait_before: Duration::from_secs(60),
        wait_message: "⏳ Waiting 1 minute...",
        average_over_minutes: None,
    },
    CheckpointSpec {
        label: "3 min avg",
        elapsed_minutes: 3,
        wait_before: Duration::from_secs(120),
        wait_message: "⏳ Waiting 2 more minutes (total 3)...",
        average_over_minutes: Some(3),
    },
    CheckpointSpec {
        label: "5 min",
        elapsed_minutes: 5,
        wait_before: Duration::from_secs(120),
        wait_message: "⏳ Waiting 2 more minutes (total 5)...",
        average_over_minutes: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_waits_match_elapsed_minutes() {
        let mut total = Duration::ZERO;
        for spec in DEFAULT_SCHEDULE {
            total += spec.wait_before;
            assert_eq!(total, Duration::from_secs(u64::from(spec.elapsed_minutes) * 60));
        }
        assert_eq!(total, Duration::from_secs(300));
    }

    #[test]
    fn test_only_first_checkpoint_is_initial() {
        assert!(DEFAULT_SCHEDULE[0].is_initial());
        assert!(DEFAULT_SCHEDULE[1..].iter().all(|s| !s.is_initial()));
    }

    #[test]
    fn test_average_only_at_three_minutes() {
        let averaged: Vec<&str> = DEFAULT_SCHEDULE
            .iter()
            .filter(|s| s.average_over_minutes.is_some())
            .map(|s| s.label)
            .collect();
        assert_eq!(averaged, vec!["3 min avg"]);
    }
}
