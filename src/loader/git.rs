use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::manifest::has_manifest;
use crate::prompt::Prompter;
use log::debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Loader for templates from git repositories.
pub struct GitLoader<'a, S: AsRef<str>> {
    repo: S,
    clone_dir: PathBuf,
    /// `None` when the operator may not be asked anything
    prompt: Option<&'a dyn Prompter>,
}

fn repo_regex() -> &'static Regex {
    static REPO_REGEX: OnceLock<Regex> = OnceLock::new();
    REPO_REGEX.get_or_init(|| {
        Regex::new(r"^((((git|hg)\+)?(git|ssh|file|https?):(//)?)|(\w+@[\w.]+))")
            .expect("repository pattern is valid")
    })
}

impl<'a, S: AsRef<str>> GitLoader<'a, S> {
    /// Creates a new GitLoader instance cloning into `clone_dir`.
    pub fn new<C: Into<PathBuf>>(repo: S, clone_dir: C, prompt: Option<&'a dyn Prompter>) -> Self {
        Self { repo, clone_dir: clone_dir.into(), prompt }
    }

    /// Returns true for anything that looks like a repository URL:
    /// `git://`, `ssh://`, `file://`, `http(s)://` (optionally `git+`/`hg+` prefixed)
    /// or `user@host` forms.
    pub fn is_git_url(s: &str) -> bool {
        repo_regex().is_match(s)
    }

    /// Repository name used as the clone directory name.
    pub fn repo_name(url: &str) -> String {
        let name = url
            .trim_end_matches('/')
            .rsplit(|c: char| c == '/' || c == ':')
            .next()
            .unwrap_or_default()
            .trim_end_matches(".git");
        if name.is_empty() {
            "template".to_string()
        } else {
            name.to_string()
        }
    }

    /// Decides what to do with an existing clone. Returns true to re-clone.
    fn replace_existing(&self, clone_path: &Path) -> Result<bool> {
        let Some(prompt) = self.prompt else {
            return Ok(true);
        };
        let replace = prompt.confirm(
            &format!(
                "You've downloaded {} before. Is it okay to delete and re-download it?",
                clone_path.display()
            ),
            true,
        )?;
        if replace {
            return Ok(true);
        }
        if prompt.confirm("Do you want to re-use the existing version?", true)? {
            Ok(false)
        } else {
            Err(Error::ValidationError(format!(
                "refusing to touch existing template clone {}",
                clone_path.display()
            )))
        }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<'_, S> {
    /// Loads a template by cloning a git repository into the clone directory.
    ///
    /// # Errors
    /// * `Error::UnsupportedSourceError` for Mercurial sources
    /// * `Error::Git2Error` if the clone fails
    /// * `Error::TemplateNotFoundError` if the repository has no manifest
    fn load(&self) -> Result<PathBuf> {
        let repo_url = self.repo.as_ref();
        if repo_url.starts_with("hg+") {
            return Err(Error::UnsupportedSourceError(format!(
                "Mercurial repositories are not supported: {}",
                repo_url
            )));
        }
        let repo_url = repo_url.strip_prefix("git+").unwrap_or(repo_url);

        let clone_path = self.clone_dir.join(Self::repo_name(repo_url));
        fs::create_dir_all(&self.clone_dir)?;

        let reuse = if clone_path.exists() {
            if self.replace_existing(&clone_path)? {
                fs::remove_dir_all(&clone_path)?;
                false
            } else {
                debug!("Using existing directory '{}'.", clone_path.display());
                true
            }
        } else {
            false
        };

        if !reuse {
            debug!("Cloning repository '{}' to '{}'.", repo_url, clone_path.display());

            // Set up authentication callbacks
            let mut callbacks = git2::RemoteCallbacks::new();
            callbacks.credentials(|_url, username_from_url, allowed_types| {
                let username = username_from_url.unwrap_or("git");
                if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                    let key = dirs::home_dir().unwrap_or_default().join(".ssh").join("id_rsa");
                    if key.exists() {
                        return git2::Cred::ssh_key(username, None, &key, None);
                    }
                    return git2::Cred::ssh_key_from_agent(username);
                }
                git2::Cred::default()
            });

            // Configure fetch options with callbacks
            let mut fetch_opts = git2::FetchOptions::new();
            fetch_opts.remote_callbacks(callbacks);

            // Set up and perform clone
            let mut builder = git2::build::RepoBuilder::new();
            builder.fetch_options(fetch_opts);
            builder.clone(repo_url, &clone_path)?;
        }

        if !has_manifest(&clone_path) {
            return Err(Error::TemplateNotFoundError {
                template: repo_url.to_string(),
                candidates: clone_path.display().to_string(),
            });
        }
        Ok(clone_path)
    }
}
