pub mod assembler;
pub mod records;

pub use assembler::{OutputBundle, assemble, event_key, player_key, season_leaderboards_key};
pub use records::*;
