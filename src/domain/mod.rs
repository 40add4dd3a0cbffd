mod collection;
pub mod match_result;
pub mod models;
mod progress;
pub mod schedule;

pub use collection::{DATE_FORMAT, EventCollection, parse_event_date};
pub use match_result::{interpret_match, parse_games};
pub use models::*;
pub use progress::ReplayProgress;
