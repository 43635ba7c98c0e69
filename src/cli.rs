//! Command-line interface implementation for govcookiecutter.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;

use crate::constants::VERSION;
use crate::request::RequestOptions;

/// Command-line arguments structure for govcookiecutter.
///
/// The generation options mirror those of cookiecutter v1.7.3 that are compatible
/// with the bundled template.
#[derive(Parser, Debug)]
#[command(
    name = "govcookiecutter",
    author,
    version = VERSION,
    about = "Generate a govcookiecutter project template",
    long_about = None
)]
pub struct Args {
    /// Do not prompt for parameters and only use `cookiecutter.json` file content
    #[arg(long)]
    pub no_input: bool,

    /// Do not prompt for parameters and only use information entered previously
    #[arg(long)]
    pub replay: bool,

    /// Overwrite the contents of the output directory if it already exists
    #[arg(short = 'f', long)]
    pub overwrite_if_exists: bool,

    /// Skip the files in the corresponding directories if they already exist
    #[arg(short = 's', long)]
    pub skip_if_file_exists: bool,

    /// Where to output the generated project dir into
    #[arg(short = 'o', long, value_name = "PATH", default_value = ".")]
    pub output_dir: String,

    /// User configuration file
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Do not load a config file. Use the defaults instead
    #[arg(long)]
    pub default_config: bool,

    /// Template directory or git repository to generate from [default: bundled template]
    #[arg(long, value_name = "SOURCE")]
    pub template: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Hands the generation flags over to the option resolver, dropping CLI-only ones.
    pub fn into_options(self) -> RequestOptions {
        RequestOptions {
            template_source: self.template,
            no_input: self.no_input,
            replay: self.replay,
            overwrite_if_exists: self.overwrite_if_exists,
            skip_if_file_exists: self.skip_if_file_exists,
            output_dir: self.output_dir,
            config_file: self.config_file,
            default_config: self.default_config,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 0 after printing help or version
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
