use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::TournamentStore;
use crate::domain::Document;
use crate::errors::{store_context, with_store_context};

/// Keeps every tournament in one pretty-printed JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                with_store_context(fs::create_dir_all(parent), "create directory for", &self.path)
            }
            _ => Ok(()),
        }
    }
}

impl TournamentStore for JsonFileStore {
    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            info!("No tournament store at {}, starting empty", self.path.display());
            return Ok(Document::new());
        }

        let json = with_store_context(fs::read_to_string(&self.path), "read", &self.path)?;
        if json.trim().is_empty() {
            return Ok(Document::new());
        }

        let document: Document = serde_json::from_str(&json).with_context(|| {
            format!(
                "{}. First 200 chars: {}",
                store_context("parse", &self.path),
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!("Loaded {} tournaments from {}", document.len(), self.path.display());
        Ok(document)
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.ensure_parent_dir()?;

        let json = serde_json::to_string_pretty(document).context("Failed to serialize tournaments")?;

        // Write beside the target, then swap
        let temp_path = self.temp_path();
        with_store_context(fs::write(&temp_path, json), "write", &temp_path)?;
        with_store_context(fs::rename(&temp_path, &self.path), "replace", &self.path)?;

        debug!("Saved {} tournaments to {}", document.len(), self.path.display());
        Ok(())
    }
}
