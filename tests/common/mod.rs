#![allow(dead_code)]

use govcookiecutter::error::Result;
use govcookiecutter::prompt::Prompter;
use govcookiecutter::request::{resolve, GenerationRequest, RequestOptions};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// A scratch area with an output directory and a user config pointing the replay
/// and clone directories into it, so tests never touch the home directory.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// `extra` is appended to the generated YAML config.
    pub fn with_config(extra: &str) -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("output")).unwrap();
        let config = format!(
            "cookiecutters_dir: '{}'\nreplay_dir: '{}'\n{}",
            root.path().join("clones").display(),
            root.path().join("replay").display(),
            extra
        );
        std::fs::write(root.path().join("config.yaml"), config).unwrap();
        Self { root }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("output")
    }

    pub fn replay_dir(&self) -> PathBuf {
        self.root.path().join("replay")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.path().join("config.yaml")
    }

    pub fn options(&self, template: &Path) -> RequestOptions {
        RequestOptions {
            template_source: Some(template.display().to_string()),
            output_dir: self.output_dir().display().to_string(),
            config_file: Some(self.config_file().display().to_string()),
            ..Default::default()
        }
    }

    pub fn request(
        &self,
        template: &Path,
        tweak: impl FnOnce(&mut RequestOptions),
    ) -> GenerationRequest {
        let mut options = self.options(template);
        tweak(&mut options);
        resolve(options).unwrap()
    }
}

/// Prompter answering from a fixed table and recording every question asked.
#[derive(Default, Clone)]
pub struct ScriptedPrompter {
    pub answers: HashMap<String, serde_json::Value>,
    pub asked: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[(&str, serde_json::Value)]) -> Self {
        Self {
            answers: answers.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            asked: Rc::default(),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn record(&self, prompt: &str) -> Option<&serde_json::Value> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers.get(prompt)
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        Ok(match self.record(prompt) {
            Some(value) => value.as_str().unwrap().to_string(),
            None => default.unwrap_or_default().to_string(),
        })
    }

    fn choice(&self, prompt: &str, choices: &[String], default: usize) -> Result<usize> {
        Ok(match self.record(prompt).and_then(|v| v.as_str()) {
            Some(answer) => choices.iter().position(|c| c == answer).unwrap(),
            None => default,
        })
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(self.record(prompt).and_then(|v| v.as_bool()).unwrap_or(default))
    }

    fn json(&self, prompt: &str, default: &serde_json::Value) -> Result<serde_json::Value> {
        Ok(self.record(prompt).cloned().unwrap_or_else(|| default.clone()))
    }
}

/// Prompter failing the test when asked anything.
pub struct NoPrompter;

impl Prompter for NoPrompter {
    fn text(&self, prompt: &str, _: Option<&str>) -> Result<String> {
        panic!("unexpected prompt: {}", prompt)
    }

    fn choice(&self, prompt: &str, _: &[String], _: usize) -> Result<usize> {
        panic!("unexpected prompt: {}", prompt)
    }

    fn confirm(&self, prompt: &str, _: bool) -> Result<bool> {
        panic!("unexpected prompt: {}", prompt)
    }

    fn json(&self, prompt: &str, _: &serde_json::Value) -> Result<serde_json::Value> {
        panic!("unexpected prompt: {}", prompt)
    }
}

/// Every file under `dir`, relative, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().display().to_string())
        .collect();
    files.sort();
    files
}
