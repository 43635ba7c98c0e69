//! User configuration handling.
//! Loads the user-level configuration file (`~/.cookiecutterrc` compatible) that
//! supplies default answers, abbreviations and the clone/replay locations.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{COOKIECUTTERS_DIR, REPLAY_DIR, USER_CONFIG_ENV, USER_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::request::ConfigSource;

/// Effective user configuration after merging a config file over the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConfig {
    /// Where git templates are cloned and bare template names are looked up
    pub cookiecutters_dir: PathBuf,
    /// Where replay records are stored
    pub replay_dir: PathBuf,
    /// Default answers overriding the manifest defaults
    pub default_context: IndexMap<String, serde_json::Value>,
    /// Template source abbreviations such as `gh:user/repo`
    pub abbreviations: IndexMap<String, String>,
}

/// On-disk shape of the configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct RawUserConfig {
    cookiecutters_dir: Option<String>,
    replay_dir: Option<String>,
    #[serde(default)]
    default_context: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    abbreviations: IndexMap<String, String>,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

/// Expands a leading `~` to the home directory.
pub fn expand_user(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

fn builtin_abbreviations() -> IndexMap<String, String> {
    IndexMap::from([
        ("gh".to_string(), "https://github.com/{0}.git".to_string()),
        ("gl".to_string(), "https://gitlab.com/{0}.git".to_string()),
        ("bb".to_string(), "https://bitbucket.org/{0}".to_string()),
    ])
}

impl Default for UserConfig {
    fn default() -> Self {
        let home = home_dir();
        Self {
            cookiecutters_dir: home.join(COOKIECUTTERS_DIR),
            replay_dir: home.join(REPLAY_DIR),
            default_context: IndexMap::new(),
            abbreviations: builtin_abbreviations(),
        }
    }
}

impl UserConfig {
    fn merge(raw: RawUserConfig) -> Self {
        let mut config = UserConfig::default();
        if let Some(dir) = raw.cookiecutters_dir {
            config.cookiecutters_dir = expand_user(&dir);
        }
        if let Some(dir) = raw.replay_dir {
            config.replay_dir = expand_user(&dir);
        }
        config.default_context = raw.default_context;
        config.abbreviations.extend(raw.abbreviations);
        config
    }
}

/// Parses configuration content (YAML; JSON is accepted as a YAML subset).
pub fn parse_config(content: &str) -> Result<UserConfig> {
    if content.trim().is_empty() {
        return Ok(UserConfig::default());
    }
    let raw: RawUserConfig = serde_yaml::from_str(content)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e)))?;
    Ok(UserConfig::merge(raw))
}

/// Loads and merges a configuration file.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist or cannot be parsed
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<UserConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Config file {} does not exist",
            path.display()
        )));
    }
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content).map_err(|e| match e {
        Error::ConfigError(reason) => {
            Error::ConfigError(format!("{} ({})", reason, path.display()))
        }
        other => other,
    })
}

/// Returns the user configuration for the given source.
///
/// `UserDefault` honours `$COOKIECUTTER_CONFIG` first, then `~/.cookiecutterrc` when it
/// exists, and falls back to the built-in defaults.
pub fn get_user_config(source: &ConfigSource) -> Result<UserConfig> {
    match source {
        ConfigSource::BuiltIn => {
            debug!("Using built-in configuration defaults");
            Ok(UserConfig::default())
        }
        ConfigSource::File(path) => load_config_file(path),
        ConfigSource::UserDefault => match std::env::var_os(USER_CONFIG_ENV) {
            Some(path) => load_config_file(PathBuf::from(path)),
            None => {
                let path = home_dir().join(USER_CONFIG_FILE);
                if path.exists() {
                    load_config_file(path)
                } else {
                    debug!("No user configuration found, using defaults");
                    Ok(UserConfig::default())
                }
            }
        },
    }
}
