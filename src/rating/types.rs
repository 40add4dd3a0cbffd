use serde::{Deserialize, Serialize};

pub type EloRating = i32;

/// Glicko-2 state on the public (1500-centred) scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlickoRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl GlickoRating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating,
            deviation,
            volatility,
        }
    }
}

/// Pre-event snapshot of an opponent together with the subject's score
/// against them (1 win, 0.5 draw, 0 loss)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlickoOpponent {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub score: f64,
}

impl GlickoOpponent {
    pub fn from_snapshot(snapshot: GlickoRating, score: f64) -> Self {
        Self {
            rating: snapshot.rating,
            deviation: snapshot.deviation,
            volatility: snapshot.volatility,
            score,
        }
    }
}
