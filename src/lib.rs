//! govcookiecutter generates analytical project templates.
//! The command-line flags are resolved into an immutable generation request, which a
//! template materializer turns into a rendered project directory.

/// Answer collection from manifest defaults or interactive prompts
pub mod answers;

/// Template embedded in the binary
pub mod bundled;

/// Command-line interface module
pub mod cli;

/// User configuration handling (`~/.cookiecutterrc` compatible)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Pre and post generation hook processing
/// Handles execution of scripts in:
/// - hooks/pre_gen_project
/// - hooks/post_gen_project
pub mod hooks;

/// An abstraction that allows implementing a source for templates.
pub mod loader;

/// Logger initialization
pub mod logger;

/// Template manifest (`cookiecutter.json`) loading
pub mod manifest;

/// Turns a generation request into a project on disk
pub mod materializer;

/// Rendered project tree generation
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;

/// Replay store for previously entered answers
pub mod replay;

/// Option resolution into a generation request
pub mod request;

/// Paths copied without rendering
pub mod verbatim;
