use std::collections::BTreeMap;

use crate::replay::{EventTally, MatchLine, percentage, round2};

/// Counters for one player restricted to one season's events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonPlayer {
    pub name: String,
    pub attended_events: u32,
    pub undefeated_events: u32,
    pub unfinished_events: u32,
    pub extra_matches_played: u32,
    pub match_win_rate: f64,
    pub game_win_rate: f64,
}

#[derive(Default)]
struct SeasonAccumulator {
    attended: u32,
    undefeated: u32,
    unfinished: u32,
    extra: u32,
    regular: MatchLine,
}

/// Aggregate the tallies of one season. Win rates only look at regular
/// matches; extra matches are counted separately.
pub fn calculate_season_stats<'a, I>(tallies: I) -> Vec<SeasonPlayer>
where
    I: IntoIterator<Item = &'a EventTally>,
{
    let mut totals: BTreeMap<&str, SeasonAccumulator> = BTreeMap::new();

    for tally in tallies {
        let rounds = tally.rounds();
        for (name, showing) in tally.iter() {
            let acc = totals.entry(name).or_default();

            if showing.attended() {
                acc.attended += 1;
            }
            if showing.unfinished(rounds) {
                acc.unfinished += 1;
            } else if showing.undefeated(rounds) {
                acc.undefeated += 1;
            }
            acc.extra += showing.extra_matches;

            acc.regular.wins += showing.regular.wins;
            acc.regular.losses += showing.regular.losses;
            acc.regular.draws += showing.regular.draws;
            acc.regular.games_won += showing.regular.games_won;
            acc.regular.games_lost += showing.regular.games_lost;
        }
    }

    totals
        .into_iter()
        .map(|(name, acc)| SeasonPlayer {
            name: name.to_string(),
            attended_events: acc.attended,
            undefeated_events: acc.undefeated,
            unfinished_events: acc.unfinished,
            extra_matches_played: acc.extra,
            match_win_rate: round2(percentage(acc.regular.wins, acc.regular.matches())),
            game_win_rate: round2(percentage(
                acc.regular.games_won,
                acc.regular.games_won + acc.regular.games_lost,
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventRecord, MatchRecord};

    fn record(p1: &str, p2: &str, result: &str, extra: &[&str]) -> MatchRecord {
        MatchRecord {
            player_1: p1.to_string(),
            player_2: p2.to_string(),
            result: result.to_string(),
            extra_match: extra.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn tally(rounds: u32, matches: Vec<MatchRecord>) -> EventTally {
        EventTally::from_event(&EventRecord {
            name: "Test".to_string(),
            date: "2024-01-10".to_string(),
            rounds,
            player_info: Default::default(),
            matches,
        })
    }

    #[test]
    fn test_aggregates_across_season_events() {
        let tallies = vec![
            tally(1, vec![record("Ann", "Ben", "2-1", &[])]),
            tally(2, vec![record("Ann", "Ben", "0-2", &[]), record("Cid", "Ann", "0-2", &["Cid"])]),
        ];

        let players = calculate_season_stats(&tallies);
        let ann = players.iter().find(|p| p.name == "Ann").unwrap();

        assert_eq!(ann.attended_events, 2);
        assert_eq!(ann.undefeated_events, 1);
        assert_eq!(ann.unfinished_events, 0);
        assert_eq!(ann.match_win_rate, 66.67);
        assert_eq!(ann.game_win_rate, 57.14);

        let cid = players.iter().find(|p| p.name == "Cid").unwrap();
        assert_eq!(cid.extra_matches_played, 1);
        assert_eq!(cid.attended_events, 0);
        assert_eq!(cid.match_win_rate, 0.0);
    }
}
