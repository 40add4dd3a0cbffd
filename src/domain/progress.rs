use log::info;

/// Track progress of the chronological replay
pub struct ReplayProgress {
    total: usize,
    replayed: usize,
    matches: usize,
}

impl ReplayProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            replayed: 0,
            matches: 0,
        }
    }

    pub fn record_event(&mut self, date: &str, match_count: usize) {
        self.replayed += 1;
        self.matches += match_count;
        self.log_progress(date);
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    fn log_progress(&self, date: &str) {
        if should_log(self.replayed, self.total) {
            info!(
                "  → Replayed {}/{} events up to {} ({} matches)",
                self.replayed, self.total, date, self.matches
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_on_milestones_and_completion() {
        assert!(should_log(10, 25));
        assert!(should_log(25, 25));
        assert!(!should_log(7, 25));
    }

    #[test]
    fn test_counts_events_and_matches() {
        let mut progress = ReplayProgress::new(2);
        progress.record_event("2024-01-10", 8);
        progress.record_event("2024-01-24", 6);

        assert_eq!(progress.matches(), 14);
    }
}
