use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tournament ratings and leaderboards")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Replay every event and rebuild the output directory
    Process {
        /// Directory holding the event files (defaults to INPUT_DIR or input/events)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory receiving the generated records (defaults to OUTPUT_DIR or files)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every season and mark the current one
    Seasons {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the date of the next scheduled event
    NextEvent {
        /// Start searching from this date (defaults to today)
        #[arg(short, long)]
        from: Option<NaiveDate>,
    },
    /// Create an empty event file for the given players
    NewEvent {
        /// Event date (defaults to the next scheduled event)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long, default_value_t = 3)]
        rounds: u32,
        /// Number of empty match slots
        #[arg(short, long, default_value_t = 0)]
        matches: usize,
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Player names
        players: Vec<String>,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_paths() {
        let cli = Cli::try_parse_from(["tournament_ratings", "process", "--input", "in", "--output", "out"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Process {
                input: Some(PathBuf::from("in")),
                output: Some(PathBuf::from("out")),
            }
        );
    }

    #[test]
    fn test_parse_new_event() {
        let cli = Cli::try_parse_from([
            "tournament_ratings",
            "new-event",
            "--date",
            "2024-01-10",
            "--matches",
            "4",
            "Ann",
            "Ben",
        ])
        .unwrap();

        match cli.command {
            Command::NewEvent {
                date,
                rounds,
                matches,
                players,
                ..
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10));
                assert_eq!(rounds, 3);
                assert_eq!(matches, 4);
                assert_eq!(players, vec!["Ann", "Ben"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["tournament_ratings", "next-event", "--from", "10/01/2024"]).is_err());
    }
}
