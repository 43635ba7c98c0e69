//! User input and interaction handling.
//! The [`Prompter`] trait keeps the answer collection independent of the terminal,
//! [`DialoguerPrompter`] is the interactive implementation.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Select};

/// Asks the operator for values, one question at a time.
pub trait Prompter {
    /// Free-text question. `default` is accepted on an empty answer.
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Single choice among `choices`; returns the selected index.
    fn choice(&self, prompt: &str, choices: &[String], default: usize) -> Result<usize>;

    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Dictionary question answered as a JSON object.
    fn json(&self, prompt: &str, default: &serde_json::Value) -> Result<serde_json::Value>;
}

/// Prompter reading answers from the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

const DICT_DEFAULT_DISPLAY: &str = "default";

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::PromptError(e.to_string())
}

fn parse_json_object(input: &str) -> std::result::Result<serde_json::Value, String> {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(value @ serde_json::Value::Object(_)) => Ok(value),
        Ok(_) => Err("Requires JSON dict.".to_string()),
        Err(e) => Err(format!("Unable to decode to JSON: {}", e)),
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string()).allow_empty(true);
        }
        input.interact_text().map_err(prompt_error)
    }

    fn choice(&self, prompt: &str, choices: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn json(&self, prompt: &str, default: &serde_json::Value) -> Result<serde_json::Value> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .default(DICT_DEFAULT_DISPLAY.to_string())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if input == DICT_DEFAULT_DISPLAY {
                    Ok(())
                } else {
                    parse_json_object(input).map(|_| ())
                }
            })
            .interact_text()
            .map_err(prompt_error)?;

        if answer == DICT_DEFAULT_DISPLAY {
            Ok(default.clone())
        } else {
            parse_json_object(&answer).map_err(Error::PromptError)
        }
    }
}
