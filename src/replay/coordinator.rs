use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use super::state::PlayerTable;
use super::tally::EventTally;
use crate::config::settings::RatingSettings;
use crate::domain::{EventCollection, EventRecord, MatchOutcome, MatchRecord, ReplayProgress, interpret_match};
use crate::rating::{Glicko2Engine, GlickoOpponent, GlickoRating, elo};

/// Final state of a full-history replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub players: PlayerTable,
    pub tallies: BTreeMap<NaiveDate, EventTally>,
    pub matches: usize,
}

/// Replays every event in date order. Owns all per-player state for the
/// duration of one run.
pub struct EventReplay<'a> {
    config: &'a RatingSettings,
    engine: Glicko2Engine,
    players: PlayerTable,
    tallies: BTreeMap<NaiveDate, EventTally>,
}

impl<'a> EventReplay<'a> {
    pub fn new(config: &'a RatingSettings) -> Self {
        Self {
            config,
            engine: Glicko2Engine::new(config),
            players: PlayerTable::new(),
            tallies: BTreeMap::new(),
        }
    }

    pub fn run(mut self, events: &EventCollection) -> ReplayOutcome {
        let mut progress = ReplayProgress::new(events.len());

        for (date, event) in events.iter() {
            self.replay_event(date, event);
            progress.record_event(&event.date, event.matches.len());
        }

        ReplayOutcome {
            players: self.players,
            tallies: self.tallies,
            matches: progress.matches(),
        }
    }

    fn replay_event(&mut self, date: NaiveDate, event: &EventRecord) {
        debug!("Replaying {} ({})", event.name, event.date);

        let known_before = self.players.names();
        let snapshots = self.snapshot_participants(event);

        let mut tally = EventTally::new(event.rounds);
        let mut opponents: BTreeMap<String, Vec<GlickoOpponent>> = BTreeMap::new();

        for record in &event.matches {
            let outcome = interpret_match(record);
            if outcome.games.is_none() {
                warn!(
                    "Unreadable score '{}' for {} vs {} on {}, counted as a draw",
                    record.result, record.player_1, record.player_2, event.date
                );
            }

            self.apply_match(record, &outcome);
            tally.add_match(record, &outcome);
            collect_opponents(&mut opponents, &snapshots, record, &outcome);
        }

        self.apply_attendance(&tally);
        self.apply_glicko(&opponents, &known_before);
        self.record_history(&tally, &event.date);

        self.tallies.insert(date, tally);
    }

    /// Glicko-2 ratings of everyone playing this event, as they stood before it
    fn snapshot_participants(&mut self, event: &EventRecord) -> BTreeMap<String, GlickoRating> {
        event
            .participants()
            .into_iter()
            .map(|name| {
                let player = self.players.get_or_insert(name, self.config);
                (name.to_string(), player.glicko)
            })
            .collect()
    }

    fn apply_match(&mut self, record: &MatchRecord, outcome: &MatchOutcome) {
        match (&outcome.winner, &outcome.loser) {
            (Some(winner), Some(loser)) => {
                let winner_stats = self.players.get_or_insert(winner, self.config);
                winner_stats.matches_won += 1;
                *winner_stats.won_against.entry(loser.clone()).or_insert(0) += 1;

                let loser_stats = self.players.get_or_insert(loser, self.config);
                loser_stats.matches_lost += 1;
                *loser_stats.lost_against.entry(winner.clone()).or_insert(0) += 1;
            }
            _ => {
                self.players.get_or_insert(&record.player_1, self.config).matches_drawn += 1;
                self.players.get_or_insert(&record.player_2, self.config).matches_drawn += 1;
            }
        }

        let games = outcome.games;
        for (player, is_first) in [(&record.player_1, true), (&record.player_2, false)] {
            let stats = self.players.get_or_insert(player, self.config);
            stats.total_matches_played += 1;

            if record.is_extra_for(player) {
                stats.extra_matches_played += 1;
            }

            if let Some((first, second)) = games {
                let (won, lost) = if is_first { (first, second) } else { (second, first) };
                stats.games_won += won;
                stats.games_lost += lost;
                stats.total_games_played += first + second;
            }
        }

        self.apply_elo(record, outcome);
    }

    fn apply_elo(&mut self, record: &MatchRecord, outcome: &MatchOutcome) {
        let rating_1 = self.players.get_or_insert(&record.player_1, self.config).elo;
        let rating_2 = self.players.get_or_insert(&record.player_2, self.config).elo;

        let score = outcome.first_player_score(record);
        let (new_1, new_2) = elo::update(rating_1, rating_2, score, self.config.elo_k_factor);

        self.players.get_or_insert(&record.player_1, self.config).elo = new_1;
        self.players.get_or_insert(&record.player_2, self.config).elo = new_2;
    }

    fn apply_attendance(&mut self, tally: &EventTally) {
        let rounds = tally.rounds();

        for (name, showing) in tally.iter() {
            let stats = self.players.get_or_insert(name, self.config);

            if showing.attended() {
                stats.attended_events += 1;
            }
            if showing.unfinished(rounds) {
                stats.unfinished_events += 1;
            } else if showing.undefeated(rounds) {
                stats.undefeated_events += 1;
            }
        }
    }

    /// One batched update per participant; players known from earlier
    /// events who sat this one out only get their deviation inflated.
    fn apply_glicko(&mut self, opponents: &BTreeMap<String, Vec<GlickoOpponent>>, known_before: &[String]) {
        for (name, faced) in opponents {
            if let Some(stats) = self.players.get_mut(name) {
                stats.glicko = self.engine.rank(stats.glicko, faced);
            }
        }

        for name in known_before {
            if opponents.contains_key(name) {
                continue;
            }
            if let Some(stats) = self.players.get_mut(name) {
                stats.glicko.deviation = self.engine.skip(stats.glicko);
            }
        }
    }

    fn record_history(&mut self, tally: &EventTally, date: &str) {
        for (name, _) in tally.iter() {
            if let Some(stats) = self.players.get_mut(name) {
                stats.record_history(date);
            }
        }
    }
}

fn collect_opponents(
    opponents: &mut BTreeMap<String, Vec<GlickoOpponent>>,
    snapshots: &BTreeMap<String, GlickoRating>,
    record: &MatchRecord,
    outcome: &MatchOutcome,
) {
    let first_score = outcome.first_player_score(record);

    let pairs = [
        (&record.player_1, &record.player_2, first_score),
        (&record.player_2, &record.player_1, 1.0 - first_score),
    ];

    for (player, opponent, score) in pairs {
        if let Some(snapshot) = snapshots.get(opponent.as_str()) {
            opponents
                .entry(player.clone())
                .or_default()
                .push(GlickoOpponent::from_snapshot(*snapshot, score));
        }
    }
}

/// Replay the full history with a fresh state
pub fn replay(events: &EventCollection, config: &RatingSettings) -> ReplayOutcome {
    EventReplay::new(config).run(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerEventInfo;

    fn record(p1: &str, p2: &str, result: &str) -> MatchRecord {
        MatchRecord {
            player_1: p1.to_string(),
            player_2: p2.to_string(),
            result: result.to_string(),
            extra_match: Vec::new(),
        }
    }

    fn event(date: &str, rounds: u32, matches: Vec<MatchRecord>) -> EventRecord {
        EventRecord {
            name: format!("Wednesday {date}"),
            date: date.to_string(),
            rounds,
            player_info: BTreeMap::<String, PlayerEventInfo>::new(),
            matches,
        }
    }

    fn run(events: Vec<EventRecord>) -> ReplayOutcome {
        let collection = EventCollection::from_events(events).unwrap();
        replay(&collection, &RatingSettings::default())
    }

    #[test]
    fn test_single_win_updates_both_players() {
        let outcome = run(vec![event("2024-01-10", 1, vec![record("A", "B", "2-1")])]);
        assert_eq!(outcome.matches, 1);

        let a = outcome.players.get("A").unwrap();
        assert_eq!(a.matches_won, 1);
        assert_eq!(a.games_won, 2);
        assert_eq!(a.games_lost, 1);
        assert_eq!(a.attended_events, 1);
        assert_eq!(a.undefeated_events, 1);
        assert_eq!(a.won_against.get("B"), Some(&1));

        let b = outcome.players.get("B").unwrap();
        assert_eq!(b.matches_lost, 1);
        assert_eq!(b.games_won, 1);
        assert_eq!(b.games_lost, 2);
        assert_eq!(b.attended_events, 1);
        assert_eq!(b.undefeated_events, 0);
        assert_eq!(b.lost_against.get("A"), Some(&1));

        assert!(a.elo > 1500 && b.elo < 1500);
        assert!(a.glicko.rating > 1500.0 && b.glicko.rating < 1500.0);
        assert!(((a.glicko.rating - 1500.0) - (1500.0 - b.glicko.rating)).abs() < 1e-6);
    }

    #[test]
    fn test_draw_counts_for_both() {
        let outcome = run(vec![event("2024-01-10", 1, vec![record("A", "B", "1-1")])]);

        for name in ["A", "B"] {
            let stats = outcome.players.get(name).unwrap();
            assert_eq!(stats.matches_drawn, 1);
            assert_eq!(stats.elo, 1500);
            assert_eq!(stats.undefeated_events, 0);
        }

        let tally = outcome.tallies.values().next().unwrap();
        assert_eq!(tally.get("A").unwrap().points(), 1);
        assert_eq!(tally.get("B").unwrap().points(), 1);
    }

    #[test]
    fn test_absent_known_player_only_gains_deviation() {
        let first = event("2024-01-10", 1, vec![record("A", "C", "2-0")]);
        let after_first = run(vec![first.clone()]).players.get("C").unwrap().glicko;

        let outcome = run(vec![first, event("2024-01-24", 1, vec![record("A", "B", "2-0")])]);
        let c = outcome.players.get("C").unwrap();

        assert!(c.glicko.deviation > after_first.deviation);
        assert_eq!(c.glicko.rating, after_first.rating);
        assert_eq!(c.glicko.volatility, after_first.volatility);
        assert_eq!(c.elo_history.len(), 2);
    }

    #[test]
    fn test_glicko_uses_pre_event_opponent_ratings() {
        // B beats A first, then A beats C. C's update must see A at baseline.
        let outcome = run(vec![event(
            "2024-01-10",
            2,
            vec![record("B", "A", "2-0"), record("A", "C", "2-0")],
        )]);
        let mirror = run(vec![event("2024-01-10", 1, vec![record("D", "C", "2-0")])]);

        let c = outcome.players.get("C").unwrap().glicko;
        let c_against_baseline = mirror.players.get("C").unwrap().glicko;
        assert_eq!(c, c_against_baseline);
    }

    #[test]
    fn test_unfinished_and_unreadable_scores() {
        let outcome = run(vec![event(
            "2024-01-10",
            3,
            vec![record("A", "B", "2-0"), record("A", "C", "ID"), record("B", "C", "0-2")],
        )]);

        let a = outcome.players.get("A").unwrap();
        assert_eq!(a.unfinished_events, 1);
        assert_eq!(a.matches_drawn, 1);
        assert_eq!(a.total_matches_played, 2);
        assert_eq!(a.total_games_played, 2);
    }

    #[test]
    fn test_history_starts_unranked_and_follows_events() {
        let outcome = run(vec![
            event("2024-01-24", 1, vec![record("A", "B", "0-2")]),
            event("2024-01-10", 1, vec![record("A", "B", "2-0")]),
        ]);

        let a = outcome.players.get("A").unwrap();
        let dates: Vec<&str> = a.elo_history.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["Unranked", "2024-01-10", "2024-01-24"]);
        assert_eq!(a.win_rate_history[1].score, 100.0);
        assert_eq!(a.win_rate_history[2].score, 50.0);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let events = vec![
            event("2024-01-10", 2, vec![record("A", "B", "2-1"), record("C", "D", "1-1")]),
            event("2024-01-24", 2, vec![record("A", "C", "0-2"), record("B", "D", "2-0")]),
            event("2024-02-07", 1, vec![record("D", "A", "2-1")]),
        ];

        assert_eq!(run(events.clone()), run(events));
    }
}
