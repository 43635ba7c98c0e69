//! Option resolution for govcookiecutter.
//! Turns the raw generation flags into a single immutable [`GenerationRequest`].
//! Nothing in this module touches the file system.

use std::path::{Path, PathBuf};

use crate::constants::VERSION;
use crate::error::{Error, Result};

/// Raw generation flags, exactly as supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// `None` selects the bundled template
    pub template_source: Option<String>,
    pub no_input: bool,
    pub replay: bool,
    pub overwrite_if_exists: bool,
    pub skip_if_file_exists: bool,
    pub output_dir: String,
    pub config_file: Option<String>,
    pub default_config: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            template_source: None,
            no_input: false,
            replay: false,
            overwrite_if_exists: false,
            skip_if_file_exists: false,
            output_dir: ".".to_string(),
            config_file: None,
            default_config: false,
        }
    }
}

/// Where the answers for the template variables come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Reuse the answer set recorded by a previous run.
    Replay,
    /// Take every manifest default without prompting.
    ManifestDefaults,
    /// Prompt for every variable, offering the defaults.
    Interactive,
}

/// Where the user configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults, no file is read.
    BuiltIn,
    /// An explicitly given configuration file.
    File(PathBuf),
    /// The materializer's own lookup of the user configuration file.
    UserDefault,
}

type AnswerSourceRule = fn(&RequestOptions) -> Option<AnswerSource>;
type ConfigSourceRule = fn(&RequestOptions) -> Option<ConfigSource>;

fn replay_rule(options: &RequestOptions) -> Option<AnswerSource> {
    options.replay.then_some(AnswerSource::Replay)
}

fn no_input_rule(options: &RequestOptions) -> Option<AnswerSource> {
    options.no_input.then_some(AnswerSource::ManifestDefaults)
}

fn interactive_rule(_: &RequestOptions) -> Option<AnswerSource> {
    Some(AnswerSource::Interactive)
}

fn default_config_rule(options: &RequestOptions) -> Option<ConfigSource> {
    options.default_config.then_some(ConfigSource::BuiltIn)
}

fn config_file_rule(options: &RequestOptions) -> Option<ConfigSource> {
    options
        .config_file
        .as_ref()
        .map(|path| ConfigSource::File(PathBuf::from(path)))
}

fn user_default_rule(_: &RequestOptions) -> Option<ConfigSource> {
    Some(ConfigSource::UserDefault)
}

/// Answer source precedence, highest first. The first rule that fires wins.
pub const ANSWER_SOURCE_RULES: [AnswerSourceRule; 3] =
    [replay_rule, no_input_rule, interactive_rule];

/// Config source precedence, highest first. The first rule that fires wins.
pub const CONFIG_SOURCE_RULES: [ConfigSourceRule; 3] =
    [default_config_rule, config_file_rule, user_default_rule];

fn first_match<T>(
    rules: &[fn(&RequestOptions) -> Option<T>],
    options: &RequestOptions,
) -> Option<T> {
    rules.iter().find_map(|rule| rule(options))
}

/// A fully resolved generation request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    template_source: Option<String>,
    no_input: bool,
    replay: bool,
    overwrite_if_exists: bool,
    skip_if_file_exists: bool,
    output_dir: PathBuf,
    config_file: Option<PathBuf>,
    default_config: bool,
    answer_source: AnswerSource,
    config_source: ConfigSource,
}

impl GenerationRequest {
    /// The template to generate from, `None` for the bundled one.
    pub fn template_source(&self) -> Option<&str> {
        self.template_source.as_deref()
    }

    pub fn no_input(&self) -> bool {
        self.no_input
    }

    pub fn replay(&self) -> bool {
        self.replay
    }

    pub fn overwrite_if_exists(&self) -> bool {
        self.overwrite_if_exists
    }

    pub fn skip_if_file_exists(&self) -> bool {
        self.skip_if_file_exists
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The configuration file exactly as supplied, even when `default_config` overrides it.
    /// Use [`GenerationRequest::config_source`] for what the materializer should load.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn default_config(&self) -> bool {
        self.default_config
    }

    pub fn answer_source(&self) -> AnswerSource {
        self.answer_source
    }

    pub fn config_source(&self) -> &ConfigSource {
        &self.config_source
    }

    /// Whether the materializer may ask the operator anything at all.
    pub fn is_interactive(&self) -> bool {
        self.answer_source == AnswerSource::Interactive
    }
}

fn validate_path(flag: &str, value: &str) -> Result<PathBuf> {
    if value.is_empty() {
        return Err(Error::ValidationError(format!("{} must not be empty", flag)));
    }
    if value.contains('\0') {
        return Err(Error::ValidationError(format!(
            "{} contains a NUL byte: {:?}",
            flag, value
        )));
    }
    Ok(PathBuf::from(value))
}

/// Resolves raw flags into a [`GenerationRequest`].
///
/// # Errors
/// * `Error::ValidationError` if the template source, output directory or configuration
///   file path is syntactically invalid
pub fn resolve(options: RequestOptions) -> Result<GenerationRequest> {
    if options.template_source.as_deref().is_some_and(|source| source.trim().is_empty()) {
        return Err(Error::ValidationError("--template must not be empty".to_string()));
    }
    let output_dir = validate_path("--output-dir", &options.output_dir)?;
    let config_file = options
        .config_file
        .as_deref()
        .map(|path| validate_path("--config-file", path))
        .transpose()?;

    let answer_source = first_match(&ANSWER_SOURCE_RULES, &options)
        .unwrap_or(AnswerSource::Interactive);
    let config_source = first_match(&CONFIG_SOURCE_RULES, &options)
        .unwrap_or(ConfigSource::UserDefault);

    log::debug!(
        "Resolved request: answers from {:?}, configuration from {:?}",
        answer_source,
        config_source
    );

    Ok(GenerationRequest {
        template_source: options.template_source,
        no_input: options.no_input,
        replay: options.replay,
        overwrite_if_exists: options.overwrite_if_exists,
        skip_if_file_exists: options.skip_if_file_exists,
        output_dir,
        config_file,
        default_config: options.default_config,
        answer_source,
        config_source,
    })
}

/// Semantic version of the running package. Display only.
pub fn version() -> &'static str {
    VERSION
}
