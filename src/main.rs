//! govcookiecutter's main application entry point.
//! Parses the command line, resolves the generation request and hands it to the
//! template materializer.

use govcookiecutter::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    materializer::{Cookiecutter, TemplateMaterializer},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    request::resolve,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the flags into a generation request
/// 2. Materializes the template with the MiniJinja renderer and terminal prompts
fn run(args: Args) -> Result<()> {
    let request = resolve(args.into_options())?;

    let materializer = Cookiecutter::new(
        Box::new(MiniJinjaRenderer::new()),
        Box::new(DialoguerPrompter::new()),
    );
    let project_dir = materializer.materialize(&request)?;

    println!("Template generation completed successfully in {}.", project_dir.display());
    Ok(())
}
