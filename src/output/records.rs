use serde::Serialize;

use crate::domain::MatchRecord;
use crate::leaderboard::LeaderboardContainer;
use crate::replay::HistoryEntry;
use crate::season::SeasonId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRecord {
    pub opponent: String,
    pub count: u32,
}

/// Glicko-2 triple rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlickoSummary {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub slug: String,
    pub attended_events: u32,
    pub undefeated_events: u32,
    pub unfinished_events: u32,
    pub elo_rating: i32,
    pub glicko_rating: GlickoSummary,
    pub draw_counter: u32,
    pub game_win_rate: f64,
    pub match_win_rate: f64,
    pub extra_matches_played: u32,
    pub matches_won_against: Vec<MatchupRecord>,
    pub matches_lost_against: Vec<MatchupRecord>,
    pub elo_history: Vec<HistoryEntry>,
    pub glicko_history: Vec<HistoryEntry>,
    pub win_rate_history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerListEntry {
    pub name: String,
    pub slug: String,
    pub url: String,
}

/// One row of an event's final standings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerResult {
    pub name: String,
    pub result: String,
    pub points: u32,
    pub deck: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub decklist: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOutput {
    pub name: String,
    pub date: String,
    pub season: SeasonId,
    pub rounds: u32,
    pub matches: Vec<MatchRecord>,
    pub results: Vec<PlayerResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListItem {
    pub name: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventList {
    pub count: usize,
    pub average_attendance: f64,
    pub min_attendance: usize,
    pub max_attendance: usize,
    pub events: Vec<EventListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEntry {
    pub season: SeasonId,
    pub current: bool,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonList {
    pub current: SeasonId,
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardsRecord {
    pub season: SeasonId,
    pub all_seasons: Vec<SeasonEntry>,
    pub leaderboards: Vec<LeaderboardContainer>,
}
