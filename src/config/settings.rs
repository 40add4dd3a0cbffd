use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub elo_base: i32,
    pub elo_k_factor: f64,
    pub glicko_base_rating: f64,
    pub glicko_base_deviation: f64,
    pub glicko_base_volatility: f64,
    pub glicko_tau: f64,
    pub convergence_tolerance: f64,
    pub max_iterations: usize,
    pub min_deviation: f64,
    pub max_deviation: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            elo_base: 1500,
            elo_k_factor: 32.0,
            glicko_base_rating: 1500.0,
            glicko_base_deviation: 350.0,
            glicko_base_volatility: 0.06,
            glicko_tau: 0.6,
            convergence_tolerance: 1e-6,
            max_iterations: 100,
            min_deviation: 30.0,
            max_deviation: 350.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardSettings {
    pub entries_per_board: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            entries_per_board: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            input_dir: env_path("INPUT_DIR", "input/events"),
            output_dir: env_path("OUTPUT_DIR", "files"),
        }
    }
}

fn env_path(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(fallback))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub leaderboard: LeaderboardSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            leaderboard: LeaderboardSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    /// Replace storage paths with the ones given on the command line
    pub fn with_paths(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.storage.input_dir = input;
        }
        if let Some(output) = output {
            self.storage.output_dir = output;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_paths_override_defaults() {
        let config = AppConfig::new().with_paths(Some(PathBuf::from("a")), None);

        assert_eq!(config.storage.input_dir, PathBuf::from("a"));
        assert_eq!(config.rating.elo_k_factor, 32.0);
        assert_eq!(config.leaderboard.entries_per_board, 32);
    }
}
