use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{EventCollection, EventRecord};
use crate::errors::{AggregationError, parse_context, read_context};

/// Directory of event files, one JSON document per event
pub struct EventSource {
    input_dir: PathBuf,
}

impl EventSource {
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
        }
    }

    /// Every `*.json` file in the input directory, in sorted path order
    pub fn event_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.input_dir)
            .with_context(|| read_context(&self.input_dir.display().to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn load_event(&self, path: &Path) -> Result<EventRecord> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).with_context(|| read_context(&display))?;
        let event: EventRecord = serde_json::from_str(&json).with_context(|| parse_context("event", &display))?;

        if event.name.trim().is_empty() {
            return Err(AggregationError::MalformedEvent {
                path: display,
                reason: "missing event name".to_string(),
            }
            .into());
        }

        debug!("Loaded {} ({} matches) from {}", event.name, event.matches.len(), display);
        Ok(event)
    }

    /// Load and index every event. Any unreadable file or duplicate date
    /// aborts the whole load.
    pub fn load_collection(&self) -> Result<EventCollection> {
        let mut collection = EventCollection::new();

        for path in self.event_files()? {
            let event = self.load_event(&path)?;
            collection
                .add(event)
                .with_context(|| format!("Rejected event file {}", path.display()))?;
        }

        info!("Loaded {} events from {}", collection.len(), self.input_dir.display());
        Ok(collection)
    }
}
