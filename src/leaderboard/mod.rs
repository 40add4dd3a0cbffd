pub mod boards;
pub mod season_stats;

use std::cmp::Ordering;

use serde::Serialize;

use crate::utils::SlugMap;

pub use boards::{LeaderboardContainer, ScoreKind, season_boards};
pub use season_stats::{SeasonPlayer, calculate_season_stats};

/// Leaderboard value, integer or fractional depending on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    Int(i64),
    Float(f64),
}

impl Score {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Score::Int(value) => value as f64,
            Score::Float(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: Score,
    pub url: String,
}

/// Highest `n` positive scores, ties broken alphabetically by name.
/// Entry URLs come from `links`.
pub fn top_n<T, N, S>(players: &[T], name_of: N, score_of: S, links: &SlugMap, n: usize) -> Vec<LeaderboardEntry>
where
    N: Fn(&T) -> &str,
    S: Fn(&T) -> Score,
{
    let mut scored: Vec<(&str, Score)> = players
        .iter()
        .map(|player| (name_of(player), score_of(player)))
        .filter(|(_, score)| score.as_f64() > 0.0)
        .collect();

    scored.sort_by(|(name_a, score_a), (name_b, score_b)| compare_entries(name_a, score_a, name_b, score_b));
    scored.truncate(n);

    scored
        .into_iter()
        .map(|(name, score)| LeaderboardEntry {
            name: name.to_string(),
            score,
            url: links.url(name),
        })
        .collect()
}

fn compare_entries(name_a: &str, score_a: &Score, name_b: &str, score_b: &Score) -> Ordering {
    score_b
        .as_f64()
        .total_cmp(&score_a.as_f64())
        .then_with(|| name_a.cmp(name_b))
}
