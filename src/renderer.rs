//! Template rendering functionality.
//! Wraps MiniJinja behind a small trait so the materializer can be driven by any
//! Jinja-compatible engine.
use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
///
/// Undefined variables are errors and trailing newlines are kept, so rendered files
/// match their sources byte-for-byte outside of template expressions.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

fn sort_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            serde_json::Value::Object(
                entries.into_iter().map(|(key, value)| (key, sort_keys(value))).collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

/// Serializes a value with sorted keys and a four space indent.
fn jsonify(value: minijinja::Value) -> std::result::Result<String, minijinja::Error> {
    let not_serializable = |e: serde_json::Error| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value is not serializable")
            .with_source(e)
    };
    let value = sort_keys(serde_json::to_value(&value).map_err(not_serializable)?);

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(&value, &mut serializer).map_err(not_serializable)?;
    String::from_utf8(out).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value is not valid UTF-8")
            .with_source(e)
    })
}

fn slugify(value: String) -> String {
    value.to_kebab_case()
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with the generation environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("jsonify", jsonify);
        env.add_filter("slugify", slugify);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MissingVariableError` if the template refers to an undefined variable
    /// * `Error::RenderError` for syntax and other rendering failures
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(|e| {
            if e.kind() == ErrorKind::UndefinedError {
                Error::MissingVariableError(e.to_string())
            } else {
                Error::RenderError(e)
            }
        })
    }
}
