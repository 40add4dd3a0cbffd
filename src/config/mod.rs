pub mod settings;

pub use settings::{AppConfig, LeaderboardSettings, RatingSettings, StorageSettings};
