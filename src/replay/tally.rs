use std::collections::BTreeMap;

use crate::domain::{EventRecord, MatchOutcome, MatchRecord, interpret_match};

/// Win/loss/draw and game counts over a set of matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchLine {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl MatchLine {
    pub fn matches(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, player: &str, record: &MatchRecord, outcome: &MatchOutcome) {
        match outcome.winner.as_deref() {
            None => self.draws += 1,
            Some(winner) if winner == player => self.wins += 1,
            Some(_) => self.losses += 1,
        }

        if let Some((first, second)) = outcome.games {
            let (won, lost) = if record.player_1 == player {
                (first, second)
            } else {
                (second, first)
            };
            self.games_won += won;
            self.games_lost += lost;
        }
    }
}

/// One player's showing at one event. Matches the player is flagged as an
/// extra participant in only show up in `all` and `extra_matches`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerEventTally {
    pub all: MatchLine,
    pub regular: MatchLine,
    pub extra_matches: u32,
}

impl PlayerEventTally {
    pub fn attended(&self) -> bool {
        self.regular.matches() > 0
    }

    pub fn unfinished(&self, rounds: u32) -> bool {
        self.attended() && self.regular.matches() < rounds
    }

    /// Every scheduled round played without a loss or a draw
    pub fn undefeated(&self, rounds: u32) -> bool {
        self.attended()
            && self.regular.losses == 0
            && self.regular.draws == 0
            && self.regular.matches() == rounds
    }

    /// Standings points: 3 per win, 1 per draw
    pub fn points(&self) -> u32 {
        self.all.wins * 3 + self.all.draws
    }

    /// "W-L", or "W-L-D" when the player drew
    pub fn result_line(&self) -> String {
        let line = format!("{}-{}", self.all.wins, self.all.losses);
        if self.all.draws > 0 {
            format!("{}-{}", line, self.all.draws)
        } else {
            line
        }
    }
}

/// Per-player tallies for one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTally {
    rounds: u32,
    players: BTreeMap<String, PlayerEventTally>,
}

impl EventTally {
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds,
            players: BTreeMap::new(),
        }
    }

    pub fn from_event(event: &EventRecord) -> Self {
        let mut tally = Self::new(event.rounds);

        for record in &event.matches {
            let outcome = interpret_match(record);
            tally.add_match(record, &outcome);
        }

        tally
    }

    pub fn add_match(&mut self, record: &MatchRecord, outcome: &MatchOutcome) {
        for player in [&record.player_1, &record.player_2] {
            let entry = self.players.entry(player.clone()).or_default();
            entry.all.record(player, record, outcome);

            if record.is_extra_for(player) {
                entry.extra_matches += 1;
            } else {
                entry.regular.record(player, record, outcome);
            }
        }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn get(&self, player: &str) -> Option<&PlayerEventTally> {
        self.players.get(player)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerEventTally)> {
        self.players.iter().map(|(name, tally)| (name.as_str(), tally))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players ordered by points, then matches played, then name
    pub fn standings(&self) -> Vec<(&str, &PlayerEventTally)> {
        let mut rows: Vec<(&str, &PlayerEventTally)> = self.iter().collect();
        rows.sort_by(|(name_a, a), (name_b, b)| {
            b.points()
                .cmp(&a.points())
                .then_with(|| b.all.matches().cmp(&a.all.matches()))
                .then_with(|| name_a.cmp(name_b))
        });
        rows
    }
}
