//! Template manifest handling.
//! Loads `cookiecutter.json` from a template directory, preserving declaration order,
//! and applies user-level default overrides to it.

use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

use crate::constants::MANIFEST_FILE;
use crate::error::{Error, Result};

/// The variables declared by a template, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub path: PathBuf,
    pub variables: IndexMap<String, serde_json::Value>,
}

/// Returns true if the directory contains a manifest.
pub fn has_manifest<P: AsRef<Path>>(template_dir: P) -> bool {
    template_dir.as_ref().join(MANIFEST_FILE).is_file()
}

/// Variable names starting with `_` are never prompted for nor rendered.
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

impl Manifest {
    /// Parses manifest content. `path` is only used for error messages.
    pub fn parse<P: Into<PathBuf>>(path: P, content: &str) -> Result<Self> {
        let path = path.into();
        let variables: IndexMap<String, serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| Error::ManifestError {
                path: path.display().to_string(),
                reason: format!("JSON decoding error: {}", e),
            })?;
        Ok(Self { path, variables })
    }

    /// Loads `cookiecutter.json` from the template directory.
    ///
    /// # Errors
    /// * `Error::ManifestError` if the file is missing or is not a JSON object
    pub fn load<P: AsRef<Path>>(template_dir: P) -> Result<Self> {
        let path = template_dir.as_ref().join(MANIFEST_FILE);
        debug!("Loading manifest from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| Error::ManifestError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    /// Applies user default answers on top of the manifest defaults.
    ///
    /// Unknown names are ignored. For a choice variable an override that is one of the
    /// choices becomes the first (default) choice, any other override is ignored.
    /// Every other variable simply takes the override as its default.
    pub fn apply_overrides(&mut self, overrides: &IndexMap<String, serde_json::Value>) {
        for (name, value) in overrides {
            let Some(current) = self.variables.get_mut(name) else {
                debug!("Ignoring default for unknown variable '{}'", name);
                continue;
            };
            match current {
                serde_json::Value::Array(choices) => {
                    if let Some(position) = choices.iter().position(|choice| choice == value) {
                        let choice = choices.remove(position);
                        choices.insert(0, choice);
                    } else {
                        debug!("Ignoring invalid choice '{}' for variable '{}'", value, name);
                    }
                }
                _ => *current = value.clone(),
            }
        }
    }
}
