pub mod coordinator;
pub mod state;
pub mod tally;

pub use coordinator::{EventReplay, ReplayOutcome, replay};
pub use state::{HistoryEntry, PlayerRunningStats, PlayerTable, percentage, round2};
pub use tally::{EventTally, MatchLine, PlayerEventTally};
