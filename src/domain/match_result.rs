use super::models::{MatchOutcome, MatchRecord};

/// Interpret a raw "a-b" score. Anything that is not exactly two integers
/// separated by '-' is a draw with the score kept verbatim.
pub fn interpret_match(record: &MatchRecord) -> MatchOutcome {
    let games = parse_games(&record.result);

    match games {
        Some((first, second)) if first > second => decided(record, &record.player_1, &record.player_2, games),
        Some((first, second)) if second > first => decided(record, &record.player_2, &record.player_1, games),
        _ => draw(record, games),
    }
}

/// Games won by each side, when the score is well formed
pub fn parse_games(score: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = score.split('-').collect();
    if parts.len() != 2 {
        return None;
    }

    let first = parts[0].trim().parse::<u32>().ok()?;
    let second = parts[1].trim().parse::<u32>().ok()?;
    Some((first, second))
}

fn decided(
    record: &MatchRecord,
    winner: &str,
    loser: &str,
    games: Option<(u32, u32)>,
) -> MatchOutcome {
    MatchOutcome {
        winner: Some(winner.to_string()),
        loser: Some(loser.to_string()),
        draw: false,
        score: record.result.clone(),
        games,
    }
}

fn draw(record: &MatchRecord, games: Option<(u32, u32)>) -> MatchOutcome {
    MatchOutcome {
        winner: None,
        loser: None,
        draw: true,
        score: record.result.clone(),
        games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(result: &str) -> MatchRecord {
        MatchRecord {
            player_1: "Alice".to_string(),
            player_2: "Bob".to_string(),
            result: result.to_string(),
            extra_match: Vec::new(),
        }
    }

    #[test]
    fn test_higher_score_wins() {
        let outcome = interpret_match(&record("2-1"));
        assert_eq!(outcome.winner.as_deref(), Some("Alice"));
        assert_eq!(outcome.loser.as_deref(), Some("Bob"));
        assert!(!outcome.draw);
        assert_eq!(outcome.games, Some((2, 1)));

        let outcome = interpret_match(&record("0-2"));
        assert_eq!(outcome.winner.as_deref(), Some("Bob"));
        assert_eq!(outcome.first_player_score(&record("0-2")), 0.0);
    }

    #[test]
    fn test_equal_score_is_draw() {
        let outcome = interpret_match(&record("1-1"));
        assert!(outcome.draw);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.games, Some((1, 1)));
        assert_eq!(outcome.first_player_score(&record("1-1")), 0.5);
    }

    #[test]
    fn test_garbage_degrades_to_draw() {
        for raw in ["", "ID", "2-1-0", "a-b", "2-", "-1"] {
            let outcome = interpret_match(&record(raw));
            assert!(outcome.draw, "{raw} should be a draw");
            assert_eq!(outcome.score, raw);
            assert_eq!(outcome.games, None);
        }
    }

    proptest! {
        #[test]
        fn winner_always_has_more_games(a in 0u32..10, b in 0u32..10) {
            let rec = record(&format!("{a}-{b}"));
            let outcome = interpret_match(&rec);
            if let Some(winner) = &outcome.winner {
                let (winner_games, loser_games) = if *winner == rec.player_1 { (a, b) } else { (b, a) };
                prop_assert!(winner_games > loser_games);
            } else {
                prop_assert_eq!(a, b);
            }
        }
    }
}
