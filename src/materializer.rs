//! Template materialization.
//! Renders a template source into a project directory for a resolved
//! [`GenerationRequest`].

use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

use crate::answers::{collect_answers, to_context};
use crate::bundled::{extract_bundled_template, BUNDLED_TEMPLATE_NAME};
use crate::config::get_user_config;
use crate::constants::{CONTEXT_KEY, POST_GEN_HOOK, PRE_GEN_HOOK, TEMPLATE_KEY};
use crate::error::{Error, Result};
use crate::hooks::run_hook;
use crate::loader::interface::TemplateLoader;
use crate::loader::local::LocalLoader;
use crate::loader::load_template;
use crate::manifest::Manifest;
use crate::processor::{find_project_template, render_and_create_dir, Processor};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::replay::ReplayStore;
use crate::request::{AnswerSource, GenerationRequest};

/// Anything able to turn a generation request into a project on disk.
pub trait TemplateMaterializer {
    /// Generates the project described by `request`.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The generated project directory
    fn materialize(&self, request: &GenerationRequest) -> Result<PathBuf>;
}

/// Cookiecutter-compatible materializer: `cookiecutter.json` manifests, Jinja
/// templates, replay records and `hooks/` scripts.
pub struct Cookiecutter {
    engine: Box<dyn TemplateRenderer>,
    prompt: Box<dyn Prompter>,
}

/// Name replay records are stored under: the template directory's base name.
pub fn template_name<P: AsRef<Path>>(template_dir: P) -> Result<String> {
    let template_dir = template_dir.as_ref();
    let absolute = fs::canonicalize(template_dir)?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::ValidationError(format!(
                "template directory {} has no name",
                template_dir.display()
            ))
        })
}

/// Removes a project directory created by a failed run.
fn discard_project(project_dir: &Path, created: bool) {
    if !created {
        return;
    }
    debug!("Removing {} after failed generation", project_dir.display());
    if let Err(e) = fs::remove_dir_all(project_dir) {
        error!("Unable to remove {}: {}", project_dir.display(), e);
    }
}

impl Cookiecutter {
    pub fn new(engine: Box<dyn TemplateRenderer>, prompt: Box<dyn Prompter>) -> Self {
        Self { engine, prompt }
    }

    fn prompter(&self, request: &GenerationRequest) -> Option<&dyn Prompter> {
        request.is_interactive().then_some(&*self.prompt)
    }

    /// Builds the rendering context according to the request's answer source.
    fn resolve_context(
        &self,
        request: &GenerationRequest,
        template_dir: &Path,
        name: &str,
        store: &ReplayStore,
        default_context: &indexmap::IndexMap<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        if request.answer_source() == AnswerSource::Replay {
            return store.load(name);
        }

        let mut manifest = Manifest::load(template_dir)?;
        manifest.apply_overrides(default_context);
        let mut answers = collect_answers(&manifest, &*self.engine, self.prompter(request))?;
        answers.insert(
            TEMPLATE_KEY.to_string(),
            serde_json::Value::String(
                request.template_source().unwrap_or(BUNDLED_TEMPLATE_NAME).to_string(),
            ),
        );

        let context = to_context(&answers);
        store.dump(name, &context)?;
        Ok(context)
    }

    /// Hooks and tree rendering, once the project directory exists.
    fn populate(
        &self,
        request: &GenerationRequest,
        template_dir: &Path,
        project_template: &Path,
        project_dir: &Path,
        context: &serde_json::Value,
    ) -> Result<()> {
        run_hook(template_dir, PRE_GEN_HOOK, project_dir, context, &*self.engine)?;

        let processor = Processor::new(
            &*self.engine,
            project_template,
            project_dir,
            context,
            request.skip_if_file_exists(),
        )?;
        processor.generate()?;

        run_hook(template_dir, POST_GEN_HOOK, project_dir, context, &*self.engine)
    }
}

impl TemplateMaterializer for Cookiecutter {
    /// # Flow
    /// 1. Loads the user configuration
    /// 2. Locates (or clones) the template, or unpacks the bundled one
    /// 3. Replays, defaults or prompts for the answers
    /// 4. Creates the project directory, failing on a collision
    /// 5. Runs the pre-generation hook, renders the tree, runs the post-generation hook
    fn materialize(&self, request: &GenerationRequest) -> Result<PathBuf> {
        let config = get_user_config(request.config_source())?;

        // Keeps the unpacked bundled template alive until generation is over.
        let bundled;
        let (template_dir, name) = match request.template_source() {
            Some(source) => {
                let dir = load_template(source, &config, self.prompter(request))?;
                let name = template_name(&dir)?;
                (dir, name)
            }
            None => {
                bundled = extract_bundled_template()?;
                let dir = LocalLoader::new(bundled.path(), &config.cookiecutters_dir).load()?;
                (dir, BUNDLED_TEMPLATE_NAME.to_string())
            }
        };

        let store = ReplayStore::new(&config.replay_dir);
        let context = self.resolve_context(
            request,
            &template_dir,
            &name,
            &store,
            &config.default_context,
        )?;
        debug!("Generating with {}", context[CONTEXT_KEY]);

        let project_template = find_project_template(&template_dir)?;
        let dir_name = project_template
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (project_dir, created) = render_and_create_dir(
            &dir_name,
            request.output_dir(),
            &context,
            &*self.engine,
            request.overwrite_if_exists(),
        )?;
        let project_dir = fs::canonicalize(&project_dir)?;

        if let Err(e) =
            self.populate(request, &template_dir, &project_template, &project_dir, &context)
        {
            if matches!(e, Error::HookError(_) | Error::MissingVariableError(_)) {
                error!("Stopping generation: {}", e);
                discard_project(&project_dir, created);
            }
            return Err(e);
        }

        Ok(project_dir)
    }
}
