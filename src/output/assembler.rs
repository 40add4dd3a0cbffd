use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use super::records::{
    EventList, EventListItem, EventOutput, GlickoSummary, LeaderboardsRecord, MatchupRecord, PlayerListEntry,
    PlayerRecord, PlayerResult, SeasonEntry, SeasonList,
};
use crate::config::settings::AppConfig;
use crate::domain::{DATE_FORMAT, EventCollection, EventRecord};
use crate::errors::AggregationError;
use crate::leaderboard::{LeaderboardContainer, Score, calculate_season_stats, season_boards, top_n};
use crate::replay::{EventTally, PlayerRunningStats, ReplayOutcome, round2};
use crate::season::{SeasonCalendar, SeasonId};
use crate::utils::{SlugMap, slugify};

pub const PLAYER_LIST_KEY: &str = "lists/players.json";
pub const EVENT_LIST_KEY: &str = "lists/events.json";
pub const SEASON_LIST_KEY: &str = "lists/seasons.json";
pub const CURRENT_LEADERBOARDS_KEY: &str = "lists/leaderboards/current.json";

/// Every record produced by one run, keyed by output path and already
/// rendered to JSON
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputBundle {
    records: BTreeMap<String, String>,
}

impl OutputBundle {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    pub fn insert<T: Serialize>(&mut self, key: String, record: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(record).with_context(|| format!("Failed to serialize {}", key))?;
        self.records.insert(key, json);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().map(|(key, json)| (key.as_str(), json.as_str()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Previously persisted keys this run did not produce
    pub fn stale_keys(&self, existing: &BTreeSet<String>) -> Vec<String> {
        existing
            .iter()
            .filter(|key| !self.records.contains_key(*key))
            .cloned()
            .collect()
    }
}

pub fn player_key(slug: &str) -> String {
    format!("players/{}.json", slug)
}

pub fn event_key(date: NaiveDate) -> String {
    format!("events/{}.json", date.format(DATE_FORMAT))
}

pub fn season_leaderboards_key(season: SeasonId) -> String {
    format!("lists/leaderboards/{}.json", season)
}

/// Turn the final replay state into the complete set of output records
pub fn assemble(outcome: &ReplayOutcome, events: &EventCollection, config: &AppConfig) -> Result<OutputBundle> {
    if events.is_empty() {
        return Err(AggregationError::NoEvents.into());
    }

    let calendar = SeasonCalendar::from_dates(&events.dates())?;
    let ranked = ranked_players(outcome);
    let links = SlugMap::new(ranked.iter().map(|player| player.name.as_str()));
    let mut bundle = OutputBundle::new();

    add_players(&mut bundle, &ranked, &links)?;
    add_events(&mut bundle, outcome, events, &calendar, &links)?;
    add_seasons(
        &mut bundle,
        outcome,
        &ranked,
        &calendar,
        &links,
        config.leaderboard.entries_per_board,
    )?;

    info!(
        "Assembled {} records for {} players and {} events",
        bundle.len(),
        ranked.len(),
        events.len()
    );
    Ok(bundle)
}

/// Players with at least one counted match
fn ranked_players(outcome: &ReplayOutcome) -> Vec<&PlayerRunningStats> {
    outcome
        .players
        .values()
        .filter(|player| player.total_matches_played > 0)
        .collect()
}

fn add_players(bundle: &mut OutputBundle, ranked: &[&PlayerRunningStats], links: &SlugMap) -> Result<()> {
    let mut list = Vec::with_capacity(ranked.len());

    for &player in ranked {
        let slug = links.slug(&player.name);
        if slug != slugify(&player.name) {
            warn!("Player '{}' got slug '{}' to keep it unique", player.name, slug);
        }

        bundle.insert(player_key(&slug), &player_record(player, &slug))?;
        list.push(PlayerListEntry {
            name: player.name.clone(),
            url: links.url(&player.name),
            slug,
        });
    }

    list.sort_by(|a, b| a.slug.cmp(&b.slug));
    bundle.insert(PLAYER_LIST_KEY.to_string(), &list)
}

fn player_record(player: &PlayerRunningStats, slug: &str) -> PlayerRecord {
    PlayerRecord {
        name: player.name.clone(),
        slug: slug.to_string(),
        attended_events: player.attended_events,
        undefeated_events: player.undefeated_events,
        unfinished_events: player.unfinished_events,
        elo_rating: player.elo,
        glicko_rating: GlickoSummary {
            mu: round2(player.glicko.rating),
            phi: round2(player.glicko.deviation),
            sigma: round2(player.glicko.volatility),
        },
        draw_counter: player.matches_drawn,
        game_win_rate: round2(player.game_win_rate()),
        match_win_rate: round2(player.match_win_rate()),
        extra_matches_played: player.extra_matches_played,
        matches_won_against: matchups(&player.won_against),
        matches_lost_against: matchups(&player.lost_against),
        elo_history: player.elo_history.clone(),
        glicko_history: player.glicko_history.clone(),
        win_rate_history: player.win_rate_history.clone(),
    }
}

/// Opponents by count descending, then name
fn matchups(counts: &BTreeMap<String, u32>) -> Vec<MatchupRecord> {
    let mut rows: Vec<MatchupRecord> = counts
        .iter()
        .map(|(opponent, &count)| MatchupRecord {
            opponent: opponent.clone(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.opponent.cmp(&b.opponent)));
    rows
}

fn add_events(
    bundle: &mut OutputBundle,
    outcome: &ReplayOutcome,
    events: &EventCollection,
    calendar: &SeasonCalendar,
    links: &SlugMap,
) -> Result<()> {
    let mut items = Vec::with_capacity(events.len());
    let mut attendance = Vec::with_capacity(events.len());

    for (date, event) in events.iter() {
        let tally = outcome
            .tallies
            .get(&date)
            .cloned()
            .unwrap_or_else(|| EventTally::from_event(event));

        let record = EventOutput {
            name: event.name.clone(),
            date: date.format(DATE_FORMAT).to_string(),
            season: calendar.season_of(date),
            rounds: event.rounds,
            matches: event.matches.clone(),
            results: event_results(event, &tally, links),
        };
        bundle.insert(event_key(date), &record)?;

        attendance.push(tally.iter().filter(|(_, showing)| showing.attended()).count());
        items.push(EventListItem {
            name: event.name.clone(),
            date: record.date,
            url: format!("/events/{}", date.format(DATE_FORMAT)),
        });
    }

    items.reverse();
    let total: usize = attendance.iter().sum();
    let list = EventList {
        count: items.len(),
        average_attendance: round2(total as f64 / attendance.len().max(1) as f64),
        min_attendance: attendance.iter().copied().min().unwrap_or(0),
        max_attendance: attendance.iter().copied().max().unwrap_or(0),
        events: items,
    };

    bundle.insert(EVENT_LIST_KEY.to_string(), &list)
}

fn event_results(event: &EventRecord, tally: &EventTally, links: &SlugMap) -> Vec<PlayerResult> {
    tally
        .standings()
        .into_iter()
        .map(|(name, showing)| {
            let info = event.deck_of(name).cloned().unwrap_or_default();
            PlayerResult {
                name: name.to_string(),
                result: showing.result_line(),
                points: showing.points(),
                deck: info.deck,
                decklist: info.decklist,
                url: links.url(name),
            }
        })
        .collect()
}

fn season_url(season: SeasonId, current: SeasonId) -> String {
    if season == current {
        "/leaderboards/current".to_string()
    } else {
        format!("/leaderboards/{}", season)
    }
}

fn add_seasons(
    bundle: &mut OutputBundle,
    outcome: &ReplayOutcome,
    ranked: &[&PlayerRunningStats],
    calendar: &SeasonCalendar,
    links: &SlugMap,
    board_size: usize,
) -> Result<()> {
    let current = calendar.current();
    let entries: Vec<SeasonEntry> = calendar
        .seasons()
        .iter()
        .map(|&season| SeasonEntry {
            season,
            current: season == current,
            url: season_url(season, current),
        })
        .collect();

    bundle.insert(
        SEASON_LIST_KEY.to_string(),
        &SeasonList {
            current,
            seasons: entries.clone(),
        },
    )?;

    let mut by_season: BTreeMap<SeasonId, Vec<&EventTally>> = BTreeMap::new();
    for (&date, tally) in &outcome.tallies {
        by_season.entry(calendar.season_of(date)).or_default().push(tally);
    }

    for &season in calendar.seasons() {
        let tallies = by_season.get(&season).map(Vec::as_slice).unwrap_or_default();
        let stats = calculate_season_stats(tallies.iter().copied());

        let mut leaderboards = Vec::new();
        let key = if season == current {
            leaderboards.extend(rating_boards(ranked, links, board_size));
            CURRENT_LEADERBOARDS_KEY.to_string()
        } else {
            season_leaderboards_key(season)
        };
        leaderboards.extend(season_boards(&stats, links, board_size));

        let record = LeaderboardsRecord {
            season,
            all_seasons: entries.clone(),
            leaderboards,
        };
        bundle.insert(key, &record)?;
    }

    Ok(())
}

fn running_name<'a>(player: &'a &PlayerRunningStats) -> &'a str {
    &player.name
}

/// All-time rating boards, only shown alongside the current season
fn rating_boards(ranked: &[&PlayerRunningStats], links: &SlugMap, size: usize) -> Vec<LeaderboardContainer> {
    vec![
        LeaderboardContainer::int(
            "Elo Rating",
            top_n(ranked, running_name, |p| Score::Int(p.elo.into()), links, size),
        ),
        LeaderboardContainer::float(
            "Glicko2 Rating",
            top_n(ranked, running_name, |p| Score::Float(round2(p.glicko.rating)), links, size),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchRecord, PlayerEventInfo};
    use crate::replay::replay;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn record(p1: &str, p2: &str, result: &str) -> MatchRecord {
        MatchRecord {
            player_1: p1.to_string(),
            player_2: p2.to_string(),
            result: result.to_string(),
            extra_match: Vec::new(),
        }
    }

    fn event(date: &str, rounds: u32, matches: Vec<MatchRecord>) -> EventRecord {
        let mut player_info = BTreeMap::new();
        player_info.insert(
            "Ann".to_string(),
            PlayerEventInfo {
                deck: "Burn".to_string(),
                decklist: String::new(),
            },
        );
        EventRecord {
            name: format!("Weekly {}", date),
            date: date.to_string(),
            rounds,
            player_info,
            matches,
        }
    }

    fn build(events: Vec<EventRecord>) -> OutputBundle {
        let config = AppConfig::default();
        let collection = EventCollection::from_events(events).unwrap();
        let outcome = replay(&collection, &config.rating);
        assemble(&outcome, &collection, &config).unwrap()
    }

    fn json(bundle: &OutputBundle, key: &str) -> Value {
        serde_json::from_str(bundle.get(key).unwrap()).unwrap()
    }

    fn two_seasons() -> Vec<EventRecord> {
        vec![
            event("2023-11-08", 1, vec![record("Ann", "Ben", "2-1")]),
            event(
                "2024-01-10",
                2,
                vec![record("Ann", "Cid", "2-0"), record("Ben", "Cid", "1-1"), record("Ann", "Ben", "0-2")],
            ),
        ]
    }

    #[test]
    fn test_produces_expected_keys() {
        let bundle = build(two_seasons());

        let keys: Vec<String> = bundle.keys().into_iter().collect();
        assert_eq!(
            keys,
            vec![
                "events/2023-11-08.json",
                "events/2024-01-10.json",
                "lists/events.json",
                "lists/leaderboards/current.json",
                "lists/leaderboards/s01.json",
                "lists/players.json",
                "lists/seasons.json",
                "players/ann.json",
                "players/ben.json",
                "players/cid.json",
            ]
        );
    }

    #[test]
    fn test_player_record_shape() {
        let bundle = build(two_seasons());
        let ann = json(&bundle, "players/ann.json");

        assert_eq!(ann["attended_events"], 2);
        assert_eq!(ann["undefeated_events"], 1);
        assert_eq!(ann["match_win_rate"], 66.67);
        assert_eq!(ann["elo_history"][0]["date"], "Unranked");
        assert_eq!(ann["elo_history"].as_array().unwrap().len(), 3);
        assert_eq!(ann["matches_won_against"][0]["opponent"], "Ben");
        assert_eq!(ann["matches_lost_against"][0]["count"], 1);
    }

    #[test]
    fn test_event_record_results_and_season() {
        let bundle = build(two_seasons());
        let event = json(&bundle, "events/2024-01-10.json");

        assert_eq!(event["season"], "s02");
        assert_eq!(event["results"][0]["name"], "Ben");
        assert_eq!(event["results"][0]["result"], "1-0-1");
        assert_eq!(event["results"][1]["name"], "Ann");
        assert_eq!(event["results"][1]["deck"], "Burn");
        assert_eq!(event["results"][2]["result"], "0-1-1");
    }

    #[test]
    fn test_lists() {
        let bundle = build(two_seasons());

        let events = json(&bundle, EVENT_LIST_KEY);
        assert_eq!(events["count"], 2);
        assert_eq!(events["events"][0]["date"], "2024-01-10");
        assert_eq!(events["min_attendance"], 2);
        assert_eq!(events["max_attendance"], 3);
        assert_eq!(events["average_attendance"], 2.5);

        let seasons = json(&bundle, SEASON_LIST_KEY);
        assert_eq!(seasons["current"], "s02");
        assert_eq!(seasons["seasons"][0]["current"], false);
        assert_eq!(seasons["seasons"][1]["url"], "/leaderboards/current");

        let players = json(&bundle, PLAYER_LIST_KEY);
        assert_eq!(players[0]["slug"], "ann");
        assert_eq!(players[2]["url"], "/players/cid");
    }

    #[test]
    fn test_leaderboards() {
        let bundle = build(two_seasons());

        let current = json(&bundle, CURRENT_LEADERBOARDS_KEY);
        let boards = current["leaderboards"].as_array().unwrap();
        assert_eq!(boards.len(), 8);
        assert_eq!(boards[0]["title"], "Elo Rating");
        assert_eq!(boards[0]["type"], "int");
        assert_eq!(boards[1]["title"], "Glicko2 Rating");
        assert_eq!(boards[2]["suffix"], "%");

        let past = json(&bundle, "lists/leaderboards/s01.json");
        let boards = past["leaderboards"].as_array().unwrap();
        assert_eq!(boards.len(), 6);
        assert_eq!(boards[0]["entries"][0]["name"], "Ann");
        assert_eq!(boards[0]["entries"][0]["score"], 100.0);
        assert_eq!(past["all_seasons"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_colliding_slugs_keep_every_player_linked() {
        let bundle = build(vec![event("2024-01-10", 1, vec![record("Ann B", "ann b", "2-0")])]);

        assert!(bundle.get("players/ann-b.json").is_some());
        assert!(bundle.get("players/ann-b-2.json").is_some());

        let players = json(&bundle, PLAYER_LIST_KEY);
        assert_eq!(players[1]["name"], "ann b");
        assert_eq!(players[1]["url"], "/players/ann-b-2");

        let elo = &json(&bundle, CURRENT_LEADERBOARDS_KEY)["leaderboards"][0]["entries"];
        assert_eq!(elo[0]["url"], "/players/ann-b");
        assert_eq!(elo[1]["name"], "ann b");
        assert_eq!(elo[1]["url"], "/players/ann-b-2");

        let results = &json(&bundle, "events/2024-01-10.json")["results"];
        assert_eq!(results[1]["url"], "/players/ann-b-2");
    }

    #[test]
    fn test_names_without_slug_characters_get_a_record() {
        let bundle = build(vec![event("2024-01-10", 1, vec![record("李", "Ann", "2-0")])]);

        assert!(bundle.get("players/.json").is_none());
        let record = json(&bundle, "players/player.json");
        assert_eq!(record["name"], "李");

        let elo = &json(&bundle, CURRENT_LEADERBOARDS_KEY)["leaderboards"][0]["entries"];
        assert_eq!(elo[0]["url"], "/players/player");
    }

    #[test]
    fn test_stale_keys() {
        let bundle = build(two_seasons());
        let existing: BTreeSet<String> = ["players/ann.json", "players/zed.json"]
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(bundle.stale_keys(&existing), vec!["players/zed.json".to_string()]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        assert_eq!(build(two_seasons()), build(two_seasons()));
    }
}
