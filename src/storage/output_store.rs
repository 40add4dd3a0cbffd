use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{read_context, write_context};

const RECORD_SUFFIX: &str = ".json";

/// Output directory addressed by record keys such as `players/ann.json`
pub struct OutputStore {
    output_dir: PathBuf,
}

impl OutputStore {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

        Ok(Self { output_dir })
    }

    /// Keys of every record currently on disk
    pub fn existing_keys(&self) -> Result<BTreeSet<String>> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&self.output_dir, &mut keys)?;
        Ok(keys)
    }

    /// Write through a temp file and rename so a record is never half written
    pub fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.build_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| write_context(key))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents).with_context(|| write_context(key))?;
        fs::rename(&temp_path, &path).with_context(|| write_context(key))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.build_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).with_context(|| read_context(&path.display().to_string()))?;
        Ok(Some(contents))
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.build_path(key);
        fs::remove_file(&path).with_context(|| format!("Failed to remove stale record {}", key))?;
        info!("Removed stale record {}", key);
        Ok(())
    }

    fn build_path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.output_dir.clone(), |path, part| path.join(part))
    }

    fn collect_keys(&self, dir: &Path, keys: &mut BTreeSet<String>) -> Result<()> {
        let entries = fs::read_dir(dir).with_context(|| read_context(&dir.display().to_string()))?;

        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if is_record(&path) {
                if let Some(key) = self.key_of(&path) {
                    keys.insert(key);
                }
            }
        }

        Ok(())
    }

    fn key_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.output_dir).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn is_record(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(RECORD_SUFFIX))
}
