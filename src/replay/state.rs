use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::settings::RatingSettings;
use crate::rating::{EloRating, GlickoRating};

pub const UNRANKED_LABEL: &str = "Unranked";

/// One point of a per-player time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub score: f64,
}

impl HistoryEntry {
    pub fn new(date: impl Into<String>, score: f64) -> Self {
        Self {
            date: date.into(),
            score,
        }
    }
}

/// Running totals for one player, mutated in event order
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRunningStats {
    pub name: String,
    pub games_won: u32,
    pub games_lost: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub matches_drawn: u32,
    pub total_games_played: u32,
    pub total_matches_played: u32,
    pub attended_events: u32,
    pub undefeated_events: u32,
    pub unfinished_events: u32,
    pub extra_matches_played: u32,
    pub won_against: BTreeMap<String, u32>,
    pub lost_against: BTreeMap<String, u32>,
    pub elo: EloRating,
    pub glicko: GlickoRating,
    pub elo_history: Vec<HistoryEntry>,
    pub glicko_history: Vec<HistoryEntry>,
    pub win_rate_history: Vec<HistoryEntry>,
}

impl PlayerRunningStats {
    pub fn new(name: &str, config: &RatingSettings) -> Self {
        let glicko = GlickoRating::new(
            config.glicko_base_rating,
            config.glicko_base_deviation,
            config.glicko_base_volatility,
        );

        Self {
            name: name.to_string(),
            games_won: 0,
            games_lost: 0,
            matches_won: 0,
            matches_lost: 0,
            matches_drawn: 0,
            total_games_played: 0,
            total_matches_played: 0,
            attended_events: 0,
            undefeated_events: 0,
            unfinished_events: 0,
            extra_matches_played: 0,
            won_against: BTreeMap::new(),
            lost_against: BTreeMap::new(),
            elo: config.elo_base,
            glicko,
            elo_history: vec![HistoryEntry::new(UNRANKED_LABEL, config.elo_base as f64)],
            glicko_history: vec![HistoryEntry::new(UNRANKED_LABEL, config.glicko_base_rating)],
            win_rate_history: vec![HistoryEntry::new(UNRANKED_LABEL, 0.0)],
        }
    }

    /// Match win rate in percent, 0 when nothing has been played
    pub fn match_win_rate(&self) -> f64 {
        percentage(self.matches_won, self.matches_won + self.matches_lost + self.matches_drawn)
    }

    /// Game win rate in percent, 0 when no games were recorded
    pub fn game_win_rate(&self) -> f64 {
        percentage(self.games_won, self.games_won + self.games_lost)
    }

    pub fn record_history(&mut self, date: &str) {
        self.elo_history.push(HistoryEntry::new(date, self.elo as f64));
        self.glicko_history.push(HistoryEntry::new(date, round2(self.glicko.rating)));
        self.win_rate_history.push(HistoryEntry::new(date, round2(self.match_win_rate())));
    }
}

pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every player seen so far, keyed by exact name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTable {
    players: BTreeMap<String, PlayerRunningStats>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    pub fn get_or_insert(&mut self, name: &str, config: &RatingSettings) -> &mut PlayerRunningStats {
        self.players
            .entry(name.to_string())
            .or_insert_with(|| PlayerRunningStats::new(name, config))
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRunningStats> {
        self.players.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PlayerRunningStats> {
        self.players.get_mut(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &PlayerRunningStats> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
