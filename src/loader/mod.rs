use crate::config::UserConfig;
use crate::error::Result;
use crate::loader::git::GitLoader;
use crate::loader::interface::TemplateLoader;
use crate::loader::local::LocalLoader;
use crate::prompt::Prompter;
use indexmap::IndexMap;
use std::path::PathBuf;

pub mod git;
pub mod interface;
pub mod local;

/// Represents the source location of a template.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

/// Expands an abbreviated template source such as `gh:user/repo`.
///
/// A source equal to an abbreviation is replaced by it. Otherwise the part before the
/// first `:` is looked up and `{0}` (or `{}`) in the expansion is replaced by the rest.
pub fn expand_abbreviations(template: &str, abbreviations: &IndexMap<String, String>) -> String {
    if let Some(expanded) = abbreviations.get(template) {
        return expanded.clone();
    }
    if let Some((prefix, rest)) = template.split_once(':') {
        if let Some(pattern) = abbreviations.get(prefix) {
            return pattern.replace("{0}", rest).replace("{}", rest);
        }
    }
    template.to_string()
}

impl TemplateSource {
    /// Classifies a template source string after abbreviation expansion.
    pub fn from_string(s: &str, abbreviations: &IndexMap<String, String>) -> Self {
        let expanded = expand_abbreviations(s, abbreviations);
        if GitLoader::<&str>::is_git_url(&expanded) {
            Self::Git(expanded)
        } else {
            Self::FileSystem(PathBuf::from(expanded))
        }
    }
}

/// Returns the local template directory for the given template source.
///
/// `prompt` is `None` when the operator may not be asked anything (replay and
/// no-input runs).
pub fn load_template(
    template: &str,
    config: &UserConfig,
    prompt: Option<&dyn Prompter>,
) -> Result<PathBuf> {
    let source = TemplateSource::from_string(template, &config.abbreviations);
    log::info!("Using template from the {}", source);

    let loader: Box<dyn TemplateLoader + '_> = match source {
        TemplateSource::Git(repo) => {
            Box::new(GitLoader::new(repo, &config.cookiecutters_dir, prompt))
        }
        TemplateSource::FileSystem(path) => {
            Box::new(LocalLoader::new(path, &config.cookiecutters_dir))
        }
    };

    loader.load()
}
