pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod leaderboard;
pub mod output;
pub mod rating;
pub mod replay;
pub mod season;
pub mod services;
pub mod storage;
pub mod utils;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::schedule::next_event;
use crate::season::SeasonCalendar;
use crate::services::{EventScaffold, ProcessingService};
use crate::storage::EventSource;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_process(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::new().with_paths(input, output);
    let service = ProcessingService::new(config)?;
    let summary = service.run()?;

    println!(
        "{} {} events ({} matches), {} players, {} records written, {} stale removed",
        "Processed".green().bold(),
        summary.events,
        summary.matches,
        summary.players,
        summary.written,
        summary.removed
    );
    Ok(())
}

pub fn handle_seasons(input: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::new().with_paths(input, None);
    let events = EventSource::new(&config.storage.input_dir).load_collection()?;
    let calendar = SeasonCalendar::from_dates(&events.dates())?;

    for &season in calendar.seasons() {
        if season == calendar.current() {
            println!("{} {}", season.to_string().bold(), "(current)".green());
        } else {
            println!("{}", season);
        }
    }
    Ok(())
}

pub fn handle_next_event(from: Option<NaiveDate>) -> Result<()> {
    let from = from.unwrap_or_else(|| Local::now().date_naive());
    println!("{}", next_event(from).to_string().cyan());
    Ok(())
}

pub fn handle_new_event(
    date: Option<NaiveDate>,
    rounds: u32,
    matches: usize,
    input: Option<PathBuf>,
    players: &[String],
) -> Result<()> {
    let config = AppConfig::new().with_paths(input, None);
    let scaffold = EventScaffold {
        date: date.unwrap_or_else(|| next_event(Local::now().date_naive())),
        rounds,
        match_slots: matches,
        players: players.to_vec(),
    };

    let path = scaffold.write(&config.storage.input_dir)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
