//! Answer collection.
//! Turns the manifest variables into the final answer set, either silently from the
//! (rendered) defaults or by prompting for each variable in manifest order.

use log::debug;
use serde_json::{Map, Value};

use crate::constants::CONTEXT_KEY;
use crate::error::{Error, Result};
use crate::manifest::{is_private, Manifest};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// How a manifest value is asked for.
#[derive(Debug, PartialEq)]
pub enum QuestionType<'a> {
    /// `_name`: copied verbatim
    Private,
    /// list: single choice, first entry is the default
    SingleChoice(&'a [Value]),
    /// object: answered as JSON, asked after every other variable
    Dictionary,
    /// boolean
    YesNo(bool),
    /// anything else
    Text,
}

/// Classifies a manifest variable.
pub fn question_type<'a>(name: &str, raw: &'a Value) -> QuestionType<'a> {
    if is_private(name) {
        return QuestionType::Private;
    }
    match raw {
        Value::Array(choices) => QuestionType::SingleChoice(choices),
        Value::Object(_) => QuestionType::Dictionary,
        Value::Bool(default) => QuestionType::YesNo(*default),
        _ => QuestionType::Text,
    }
}

/// Wraps an answer set into the context templates are rendered with.
pub fn to_context(answers: &Map<String, Value>) -> Value {
    let mut context = Map::new();
    context.insert(CONTEXT_KEY.to_string(), Value::Object(answers.clone()));
    Value::Object(context)
}

/// Renders a raw manifest value with the answers collected so far.
///
/// Strings are rendered, numbers are rendered as strings, lists and objects are
/// rendered recursively (object keys too), booleans and null are kept.
pub fn render_variable(
    engine: &dyn TemplateRenderer,
    raw: &Value,
    answers: &Map<String, Value>,
) -> Result<Value> {
    match raw {
        Value::Null | Value::Bool(_) => Ok(raw.clone()),
        Value::String(s) => Ok(Value::String(engine.render(s, &to_context(answers))?)),
        Value::Number(n) => {
            Ok(Value::String(engine.render(&n.to_string(), &to_context(answers))?))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render_variable(engine, item, answers))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(obj) => {
            let mut rendered = Map::new();
            for (key, value) in obj {
                let key = engine.render(key, &to_context(answers))?;
                rendered.insert(key, render_variable(engine, value, answers)?);
            }
            Ok(Value::Object(rendered))
        }
    }
}

/// Text shown for a value in a prompt: strings without quotes, anything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn missing_default(name: &str) -> Error {
    Error::MissingVariableError(format!("'{}' has no default value", name))
}

/// Collects the answers for every manifest variable.
///
/// `prompter` is `None` when no prompting is allowed; every variable then takes its
/// rendered default.
///
/// # Errors
/// * `Error::MissingVariableError` if a default refers to an undefined variable or a
///   non-interactive variable has a null default
/// * `Error::ManifestError` for a choice variable without choices
pub fn collect_answers(
    manifest: &Manifest,
    engine: &dyn TemplateRenderer,
    prompter: Option<&dyn Prompter>,
) -> Result<Map<String, Value>> {
    let mut answers = Map::new();

    // Scalars and choices first, so dictionaries may refer to any of them.
    for (name, raw) in &manifest.variables {
        let value = match question_type(name, raw) {
            QuestionType::Private => raw.clone(),
            QuestionType::Dictionary => continue,
            QuestionType::SingleChoice(choices) => {
                if choices.is_empty() {
                    return Err(Error::ManifestError {
                        path: manifest.path.display().to_string(),
                        reason: format!("choice variable '{}' has no choices", name),
                    });
                }
                let options = choices
                    .iter()
                    .map(|choice| render_variable(engine, choice, &answers))
                    .collect::<Result<Vec<_>>>()?;
                match prompter {
                    Some(prompter) => {
                        let labels: Vec<String> = options.iter().map(display_value).collect();
                        let index = prompter.choice(name, &labels, 0)?;
                        options.into_iter().nth(index).ok_or_else(|| {
                            Error::PromptError(format!("invalid choice for '{}'", name))
                        })?
                    }
                    None => options.into_iter().next().unwrap_or(Value::Null),
                }
            }
            QuestionType::YesNo(default) => match prompter {
                Some(prompter) => Value::Bool(prompter.confirm(name, default)?),
                None => Value::Bool(default),
            },
            QuestionType::Text => {
                let default = render_variable(engine, raw, &answers)?;
                match prompter {
                    Some(prompter) => {
                        let default = (!default.is_null()).then(|| display_value(&default));
                        Value::String(prompter.text(name, default.as_deref())?)
                    }
                    None if default.is_null() => return Err(missing_default(name)),
                    None => default,
                }
            }
        };
        debug!("Answer for '{}': {}", name, value);
        answers.insert(name.clone(), value);
    }

    // Dictionaries in a second pass, inserted in declaration order.
    let mut ordered = Map::new();
    for (name, raw) in &manifest.variables {
        if question_type(name, raw) == QuestionType::Dictionary {
            let default = render_variable(engine, raw, &answers)?;
            let value = match prompter {
                Some(prompter) => prompter.json(name, &default)?,
                None => default,
            };
            debug!("Answer for '{}': {}", name, value);
            ordered.insert(name.clone(), value);
        } else if let Some(value) = answers.get(name) {
            ordered.insert(name.clone(), value.clone());
        }
    }

    Ok(ordered)
}
