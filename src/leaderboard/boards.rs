use serde::Serialize;

use super::season_stats::SeasonPlayer;
use super::{LeaderboardEntry, Score, top_n};
use crate::utils::SlugMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Int,
    Float,
}

/// A titled, ranked list as shown on the leaderboards page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardContainer {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ScoreKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardContainer {
    pub fn int(title: &str, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            title: title.to_string(),
            kind: ScoreKind::Int,
            suffix: None,
            entries,
        }
    }

    pub fn float(title: &str, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            title: title.to_string(),
            kind: ScoreKind::Float,
            suffix: None,
            entries,
        }
    }

    pub fn percentage(title: &str, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            suffix: Some("%".to_string()),
            ..Self::float(title, entries)
        }
    }
}

fn player_name(player: &SeasonPlayer) -> &str {
    &player.name
}

/// The six boards every season gets
pub fn season_boards(players: &[SeasonPlayer], links: &SlugMap, size: usize) -> Vec<LeaderboardContainer> {
    vec![
        LeaderboardContainer::percentage(
            "Match Win Percentage",
            top_n(players, player_name, |p| Score::Float(p.match_win_rate), links, size),
        ),
        LeaderboardContainer::percentage(
            "Game Win Percentage",
            top_n(players, player_name, |p| Score::Float(p.game_win_rate), links, size),
        ),
        LeaderboardContainer::int(
            "Played Events",
            top_n(players, player_name, |p| Score::Int(p.attended_events.into()), links, size),
        ),
        LeaderboardContainer::int(
            "Undefeated Events",
            top_n(players, player_name, |p| Score::Int(p.undefeated_events.into()), links, size),
        ),
        LeaderboardContainer::int(
            "Extra Matches Played",
            top_n(players, player_name, |p| Score::Int(p.extra_matches_played.into()), links, size),
        ),
        LeaderboardContainer::int(
            "Unfinished Events",
            top_n(players, player_name, |p| Score::Int(p.unfinished_events.into()), links, size),
        ),
    ]
}
