use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tournament event as stored in the input directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub rounds: u32,
    #[serde(default)]
    pub player_info: BTreeMap<String, PlayerEventInfo>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl EventRecord {
    /// Every player named in a match, in first-seen order
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.matches {
            for name in [record.player_1.as_str(), record.player_2.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn deck_of(&self, player: &str) -> Option<&PlayerEventInfo> {
        self.player_info.get(player)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerEventInfo {
    #[serde(default)]
    pub deck: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub decklist: String,
}

/// Single pairing between two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_1: String,
    pub player_2: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_match: Vec<String>,
}

impl MatchRecord {
    pub fn is_extra_for(&self, player: &str) -> bool {
        self.extra_match.iter().any(|name| name == player)
    }
}

/// Interpreted result of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub draw: bool,
    pub score: String,
    pub games: Option<(u32, u32)>,
}

impl MatchOutcome {
    /// Score from the first player's point of view: 1 win, 0.5 draw, 0 loss
    pub fn first_player_score(&self, record: &MatchRecord) -> f64 {
        match &self.winner {
            None => 0.5,
            Some(winner) if *winner == record.player_1 => 1.0,
            Some(_) => 0.0,
        }
    }
}
