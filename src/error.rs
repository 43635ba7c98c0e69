//! Error handling for govcookiecutter.
//! Defines the crate-wide error type, its categories and the result alias.

use std::io;
use thiserror::Error;

/// Custom error types for govcookiecutter operations.
///
/// Every failure of the option resolver or the template materializer ends up here
/// and is reported to the operator as a terminal CLI error.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Impossible flag combination or malformed path, detected before any I/O
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// No template directory could be located for the given source
    #[error(
        "A valid template for '{template}' could not be found in the following locations: \
         {candidates}."
    )]
    TemplateNotFoundError { template: String, candidates: String },

    /// The template source uses a scheme that cannot be fetched
    #[error("Unsupported template source: {0}.")]
    UnsupportedSourceError(String),

    /// The template manifest is missing, unreadable or malformed
    #[error("Manifest error in '{path}': {reason}.")]
    ManifestError { path: String, reason: String },

    /// The user configuration file is missing or malformed
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The replay record could not be read or written
    #[error("Replay error: {0}.")]
    ReplayError(String),

    /// The computed project directory already exists and overwrite was not requested
    #[error("Error: \"{output_dir}\" directory already exists.")]
    OutputDirectoryExistsError { output_dir: String },

    /// A template variable has no resolvable value
    #[error("Missing template variable: {0}.")]
    MissingVariableError(String),

    /// Represents errors raised by the template engine
    #[error("Template rendering error: {0}.")]
    RenderError(#[from] minijinja::Error),

    /// Represents errors that occur during hook script execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// Represents errors raised while reading answers from the terminal
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors raised while cloning a git template
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),
}

/// Coarse classification of [`Error`] variants, as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Recoverable by correcting the invocation.
    Validation,
    /// Template source, manifest, configuration or replay data could not be used.
    TemplateResolution,
    /// The output target already exists.
    Collision,
    /// A required variable has no value under the chosen answer source.
    MissingVariable,
    /// A pre or post generation hook failed.
    HookFailure,
    /// An underlying file-system or terminal operation failed.
    Io,
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ValidationError(_) => ErrorCategory::Validation,
            Error::TemplateNotFoundError { .. }
            | Error::UnsupportedSourceError(_)
            | Error::ManifestError { .. }
            | Error::ConfigError(_)
            | Error::ReplayError(_)
            | Error::RenderError(_)
            | Error::Git2Error(_) => ErrorCategory::TemplateResolution,
            Error::OutputDirectoryExistsError { .. } => ErrorCategory::Collision,
            Error::MissingVariableError(_) => ErrorCategory::MissingVariable,
            Error::HookError(_) => ErrorCategory::HookFailure,
            Error::IoError(_) | Error::PromptError(_) => ErrorCategory::Io,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::IoError(err.into())
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
