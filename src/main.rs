use anyhow::Result;

use tournament_ratings::cli::Command;
use tournament_ratings::{
    handle_completions, handle_new_event, handle_next_event, handle_process, handle_seasons, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Process { input, output } => handle_process(input, output),
        Command::Seasons { input } => handle_seasons(input),
        Command::NextEvent { from } => handle_next_event(from),
        Command::NewEvent {
            date,
            rounds,
            matches,
            input,
            players,
        } => handle_new_event(date, rounds, matches, input, &players),
        Command::Completions { shell } => handle_completions(shell),
    }
}
