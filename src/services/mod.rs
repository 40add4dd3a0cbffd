pub mod processing;
pub mod scaffold;

pub use processing::{ProcessingService, RunSummary};
pub use scaffold::EventScaffold;
