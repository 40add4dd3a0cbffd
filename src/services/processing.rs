use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::EventCollection;
use crate::output::{self, OutputBundle};
use crate::replay::{self, ReplayOutcome};
use crate::storage::{EventSource, OutputStore};

/// What one processing run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub matches: usize,
    pub players: usize,
    pub written: usize,
    pub removed: usize,
}

pub struct ProcessingService {
    config: AppConfig,
    source: EventSource,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = EventSource::new(&config.storage.input_dir);
        Ok(Self { config, source })
    }

    /// Full rebuild: nothing is written until every event has been replayed
    /// and every record assembled
    pub fn run(&self) -> Result<RunSummary> {
        info!("=== Starting Event Processing ===\n");
        info!(
            "Input: {}, Output: {}",
            self.config.storage.input_dir.display(),
            self.config.storage.output_dir.display()
        );

        let events = self.source.load_collection()?;
        info!("  → Loaded {} events\n", events.len());

        let outcome = self.replay_events(&events);
        info!("  → Replayed {} matches for {} players\n", outcome.matches, outcome.players.len());

        let bundle = output::assemble(&outcome, &events, &self.config)?;
        info!("  → Assembled {} output records\n", bundle.len());

        let store = OutputStore::new(&self.config.storage.output_dir)?;
        let written = self.write_records(&store, &bundle)?;
        let removed = self.prune_stale(&store, &bundle)?;
        info!("  → Wrote {} records, removed {} stale records\n", written, removed);

        info!("=== Processing Complete ===");
        Ok(RunSummary {
            events: events.len(),
            matches: outcome.matches,
            players: outcome.players.len(),
            written,
            removed,
        })
    }

    fn replay_events(&self, events: &EventCollection) -> ReplayOutcome {
        replay::replay(events, &self.config.rating)
    }

    /// Records whose content is already on disk are left alone
    fn write_records(&self, store: &OutputStore, bundle: &OutputBundle) -> Result<usize> {
        let mut written = 0;
        for (key, json) in bundle.iter() {
            if store.read(key)?.as_deref() == Some(json) {
                continue;
            }
            store.write(key, json)?;
            written += 1;
        }
        Ok(written)
    }

    fn prune_stale(&self, store: &OutputStore, bundle: &OutputBundle) -> Result<usize> {
        let stale = bundle.stale_keys(&store.existing_keys()?);
        for key in &stale {
            store.remove(key)?;
        }
        Ok(stale.len())
    }
}
