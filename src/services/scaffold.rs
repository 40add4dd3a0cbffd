use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::{DATE_FORMAT, EventRecord, MatchRecord, PlayerEventInfo};
use crate::errors::write_context;

/// Writes an empty event file for the organizer to fill in
pub struct EventScaffold {
    pub date: NaiveDate,
    pub rounds: u32,
    pub match_slots: usize,
    pub players: Vec<String>,
}

impl EventScaffold {
    pub fn build(&self) -> EventRecord {
        let date = self.date.format(DATE_FORMAT).to_string();
        let player_info: BTreeMap<String, PlayerEventInfo> = self
            .players
            .iter()
            .map(|name| (name.clone(), PlayerEventInfo::default()))
            .collect();

        let matches = (0..self.match_slots)
            .map(|_| MatchRecord {
                player_1: String::new(),
                player_2: String::new(),
                result: String::new(),
                extra_match: Vec::new(),
            })
            .collect();

        EventRecord {
            name: format!("Event {}", date),
            date,
            rounds: self.rounds,
            player_info,
            matches,
        }
    }

    /// Write `<date>.json` into `input_dir`, refusing to replace an existing file
    pub fn write(&self, input_dir: &std::path::Path) -> Result<PathBuf> {
        let event = self.build();
        let path = input_dir.join(format!("{}.json", event.date));
        if path.exists() {
            bail!("Event file {} already exists", path.display());
        }

        fs::create_dir_all(input_dir).context("Failed to create input directory")?;
        let json = serde_json::to_string_pretty(&event)?;
        fs::write(&path, json).with_context(|| write_context(&path.display().to_string()))?;

        info!("Created {} with {} players", path.display(), self.players.len());
        Ok(path)
    }
}
