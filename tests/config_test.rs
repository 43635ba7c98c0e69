use govcookiecutter::config::{get_user_config, load_config_file, parse_config, UserConfig};
use govcookiecutter::error::Error;
use govcookiecutter::request::ConfigSource;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_builtin_defaults() {
    let config = get_user_config(&ConfigSource::BuiltIn).unwrap();
    let home = dirs::home_dir().unwrap_or_default();

    assert_eq!(config.cookiecutters_dir, home.join(".cookiecutters"));
    assert_eq!(config.replay_dir, home.join(".cookiecutter_replay"));
    assert!(config.default_context.is_empty());
    assert_eq!(config.abbreviations["gh"], "https://github.com/{0}.git");
}

#[test]
fn test_parse_merges_over_defaults() {
    let config = parse_config(
        r#"
default_context:
  organisation_name: "Office for National Statistics"
  using_r: "Yes"
replay_dir: "/tmp/replay"
abbreviations:
  ons: "https://github.com/ONSdigital/{0}.git"
"#,
    )
    .unwrap();

    assert_eq!(config.replay_dir, PathBuf::from("/tmp/replay"));
    assert_eq!(config.cookiecutters_dir, UserConfig::default().cookiecutters_dir);
    assert_eq!(
        config.default_context["organisation_name"],
        json!("Office for National Statistics")
    );
    assert_eq!(config.abbreviations["ons"], "https://github.com/ONSdigital/{0}.git");
    // Built-in abbreviations survive the merge.
    assert!(config.abbreviations.contains_key("gh"));
}

#[test]
fn test_json_is_accepted() {
    let config = parse_config(r#"{"default_context": {"project_name": "From JSON"}}"#).unwrap();
    assert_eq!(config.default_context["project_name"], json!("From JSON"));
}

#[test]
fn test_invalid_yaml() {
    let err = parse_config("default_context: [unclosed").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let err = load_config_file(&missing).unwrap_err();
    assert!(matches!(err, Error::ConfigError(msg) if msg.contains("does not exist")));

    let err = get_user_config(&ConfigSource::File(missing)).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_config_file_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "cookiecutters_dir: '~/clones'\n").unwrap();

    let config = get_user_config(&ConfigSource::File(path)).unwrap();
    assert_eq!(config.cookiecutters_dir, dirs::home_dir().unwrap_or_default().join("clones"));
}
