pub mod elo;
pub mod glicko2;
pub mod types;

pub use glicko2::Glicko2Engine;
pub use types::{EloRating, GlickoOpponent, GlickoRating};
