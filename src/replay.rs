//! Replay store.
//! Keeps the last answer set used for each template so a later run can regenerate
//! the project without prompting.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONTEXT_KEY;
use crate::error::{Error, Result};

/// Directory of replay records, one JSON file per template name.
#[derive(Debug, Clone)]
pub struct ReplayStore {
    dir: PathBuf,
}

impl ReplayStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the record for `template_name`.
    pub fn record_path(&self, template_name: &str) -> PathBuf {
        let file_name = if template_name.ends_with(".json") {
            template_name.to_string()
        } else {
            format!("{}.json", template_name)
        };
        self.dir.join(file_name)
    }

    /// Writes the rendering context (`{"cookiecutter": {...}}`) for `template_name`.
    pub fn dump(&self, template_name: &str, context: &serde_json::Value) -> Result<()> {
        if context.get(CONTEXT_KEY).is_none() {
            return Err(Error::ReplayError(format!(
                "Context is required to contain a {} key",
                CONTEXT_KEY
            )));
        }
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::ReplayError(format!(
                "Unable to create replay dir at {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.record_path(template_name);
        let content = serde_json::to_string_pretty(context)
            .map_err(|e| Error::ReplayError(e.to_string()))?;
        fs::write(&path, content)?;
        debug!("Recorded answers in {}", path.display());
        Ok(())
    }

    /// Reads the rendering context recorded for `template_name`.
    ///
    /// # Errors
    /// * `Error::ReplayError` if no record exists or it lacks the answers key
    pub fn load(&self, template_name: &str) -> Result<serde_json::Value> {
        let path = self.record_path(template_name);
        debug!("Replaying answers from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::ReplayError(format!("Unable to read {}: {}", path.display(), e))
        })?;
        let context: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            Error::ReplayError(format!("Invalid replay file {}: {}", path.display(), e))
        })?;
        if !context.get(CONTEXT_KEY).is_some_and(|answers| answers.is_object()) {
            return Err(Error::ReplayError(format!(
                "Context is required to contain a {} key",
                CONTEXT_KEY
            )));
        }
        Ok(context)
    }
}
