//! Persistence of authored scripts.
//!
//! A script is durable only as its serializable array of step records; this
//! store writes exactly that, one pretty-printed JSON file per script name
//! under a directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ChainError;
use crate::step::{record_from_value, StepRecord};

/// Directory-backed store of named scripts.
pub struct ScriptStore {
    dir: PathBuf,
}

impl ScriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn script_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Save a script under `name`, creating the store directory if needed
    /// and replacing any previous script of the same name.
    pub async fn save(&self, name: &str, records: &[StepRecord]) -> Result<(), ChainError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ChainError::Environment(format!("failed to create script directory: {e}"))
        })?;
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| ChainError::Environment(format!("failed to serialize script: {e}")))?;
        let path = self.script_path(name);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| ChainError::Environment(format!("failed to write script file: {e}")))?;
        info!(name, path = %path.display(), "script saved");
        Ok(())
    }

    /// Load the script saved under `name`. `Ok(None)` when no such script
    /// exists; a present-but-invalid file is an error, not an absence.
    pub async fn load(&self, name: &str) -> Result<Option<Vec<StepRecord>>, ChainError> {
        let path = self.script_path(name);
        if !path.exists() {
            debug!(name, "no stored script");
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ChainError::Environment(format!("failed to read script file: {e}")))?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&content).map_err(|e| {
            ChainError::MalformedRecord(format!("stored script is not a record array: {e}"))
        })?;
        let records = values
            .iter()
            .map(record_from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(records))
    }

    /// Names of all stored scripts, in no particular order.
    pub async fn list(&self) -> Result<Vec<String>, ChainError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            ChainError::Environment(format!("failed to read script directory: {e}"))
        })?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            ChainError::Environment(format!("failed to read script directory: {e}"))
        })? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Remove the script saved under `name`, if present.
    pub async fn remove(&self, name: &str) -> Result<(), ChainError> {
        let path = self.script_path(name);
        if path.exists() {
            tokio::fs::remove_file(&path).await.map_err(|e| {
                ChainError::Environment(format!("failed to remove script file: {e}"))
            })?;
            info!(name, "script removed");
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
