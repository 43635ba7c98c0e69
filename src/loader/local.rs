use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::manifest::has_manifest;
use log::debug;
use std::path::{Path, PathBuf};

/// Loader for templates from the local filesystem.
///
/// A template is looked up as given and, failing that, inside the clone directory,
/// so a template cloned earlier can be referred to by its bare name.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
    clone_dir: PathBuf,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new<C: Into<PathBuf>>(path: P, clone_dir: C) -> Self {
        Self { path, clone_dir: clone_dir.into() }
    }

    /// Candidate template directories, in lookup order.
    ///
    /// An absolute path is its own only candidate.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let path = self.path.as_ref();
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }
        vec![path.to_path_buf(), self.clone_dir.join(path)]
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Returns the first candidate directory holding a manifest.
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` listing every candidate if none qualifies
    fn load(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        for candidate in &candidates {
            if has_manifest(candidate) {
                debug!("Using template directory '{}'", candidate.display());
                return Ok(candidate.clone());
            }
        }

        Err(Error::TemplateNotFoundError {
            template: self.path.as_ref().display().to_string(),
            candidates: candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
