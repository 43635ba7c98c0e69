//! Project tree generation.
//! Walks the project template directory and writes the rendered tree into the
//! project directory, honouring the copy-only patterns and the file skip policy.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::verbatim::build_copy_only_set;

/// Number of leading bytes inspected when deciding whether a file is binary.
const BINARY_SNIFF_LEN: usize = 8000;

/// Returns true if a directory name is a template expression naming the project.
pub fn is_project_template_name(name: &str) -> bool {
    name.contains("cookiecutter") && name.contains("{{") && name.contains("}}")
}

/// Finds the project template directory at the top level of the template.
///
/// # Errors
/// * `Error::TemplateNotFoundError` if no top-level directory has a templated name
pub fn find_project_template<P: AsRef<Path>>(template_dir: P) -> Result<PathBuf> {
    let template_dir = template_dir.as_ref();
    let mut entries = fs::read_dir(template_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    entries.sort();

    entries
        .into_iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_project_template_name)
        })
        .ok_or_else(|| Error::TemplateNotFoundError {
            template: template_dir.display().to_string(),
            candidates: format!(
                "{} (no directory named like '{{{{ cookiecutter.<name> }}}}')",
                template_dir.display()
            ),
        })
}

/// Renders the project directory name and creates it under `output_dir`.
///
/// # Returns
/// * `(PathBuf, bool)` - Project directory and whether this call created it
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if it exists and `overwrite_if_exists` is false
pub fn render_and_create_dir(
    dir_name: &str,
    output_dir: &Path,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
    overwrite_if_exists: bool,
) -> Result<(PathBuf, bool)> {
    let rendered = engine.render(dir_name, context)?;
    if !is_rendered_path_valid(&rendered) {
        return Err(Error::ValidationError(format!(
            "project directory name '{}' rendered to an invalid path '{}'",
            dir_name, rendered
        )));
    }
    let dir = output_dir.join(rendered);
    if dir.exists() {
        if !overwrite_if_exists {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: dir.display().to_string(),
            });
        }
        debug!("Output directory {} already exists, overwriting it", dir.display());
        return Ok((dir, false));
    }
    fs::create_dir_all(&dir)?;
    Ok((dir, true))
}

/// A rendered relative path must be non-empty, relative and free of empty or parent segments.
pub fn is_rendered_path_valid(path: &str) -> bool {
    if path.trim().is_empty() || path.starts_with('/') || path.contains("//") {
        return false;
    }
    Path::new(path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Heuristic used to copy files instead of rendering them.
pub fn is_binary_content(content: &[u8]) -> bool {
    let head = &content[..content.len().min(BINARY_SNIFF_LEN)];
    head.contains(&0) || std::str::from_utf8(content).is_err()
}

/// Returns true if the first line of `content` ends with `\r\n`.
pub fn uses_crlf(content: &str) -> bool {
    content
        .find('\n')
        .is_some_and(|index| index > 0 && content.as_bytes()[index - 1] == b'\r')
}

/// Relative path of `path` under `root` with `/` separators, as patterns expect it.
pub fn relative_template_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::ValidationError(e.to_string()))?;
    let parts = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                Error::ValidationError(format!("non UTF-8 path: {}", path.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

fn copy_permissions(source: &Path, target: &Path) -> Result<()> {
    let permissions = fs::metadata(source)?.permissions();
    fs::set_permissions(target, permissions)?;
    Ok(())
}

/// What happened to a single template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDir,
    Copy,
    Write,
    Skip,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            FileOperation::CreateDir => "Creating",
            FileOperation::Copy => "Copying",
            FileOperation::Write => "Rendering",
            FileOperation::Skip => "Skipping",
        };
        f.write_str(action)
    }
}

/// Writes a rendered project tree.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_dir: &'a Path,
    project_dir: &'a Path,
    context: &'a serde_json::Value,
    skip_if_file_exists: bool,
    copy_only: GlobSet,
}

impl<'a> Processor<'a> {
    /// Creates a processor for the project template `template_dir`.
    ///
    /// # Errors
    /// * `Error::ManifestError` if a `_copy_without_render` pattern is invalid
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_dir: &'a Path,
        project_dir: &'a Path,
        context: &'a serde_json::Value,
        skip_if_file_exists: bool,
    ) -> Result<Self> {
        let copy_only = build_copy_only_set(context)?;
        Ok(Self { engine, template_dir, project_dir, context, skip_if_file_exists, copy_only })
    }

    fn target_for(&self, relative: &str) -> Result<Option<PathBuf>> {
        let rendered = self.engine.render(relative, self.context)?;
        if rendered.ends_with('/') || !is_rendered_path_valid(&rendered) {
            debug!("The resulting file name is empty: '{}'", rendered);
            return Ok(None);
        }
        Ok(Some(self.project_dir.join(rendered)))
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<FileOperation> {
        if self.skip_if_file_exists && target.exists() {
            return Ok(FileOperation::Skip);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, target)?;
        Ok(FileOperation::Copy)
    }

    fn copy_dir(&self, source: &Path, target: &Path) -> Result<()> {
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            let destination = target.join(entry.path().strip_prefix(source).map_err(|e| {
                Error::ValidationError(e.to_string())
            })?);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)?;
            } else {
                let operation = self.copy_file(entry.path(), &destination)?;
                debug!("{}: '{}'", operation, destination.display());
            }
        }
        Ok(())
    }

    /// Generates one file.
    fn generate_file(&self, source: &Path, relative: &str, target: &Path) -> Result<FileOperation> {
        if target.is_dir() {
            debug!("The resulting file name is empty: '{}'", target.display());
            return Ok(FileOperation::Skip);
        }
        if self.skip_if_file_exists && target.exists() {
            debug!("The resulting file already exists: '{}'", target.display());
            return Ok(FileOperation::Skip);
        }
        if self.copy_only.is_match(relative) {
            return self.copy_file(source, target);
        }

        let bytes = fs::read(source)?;
        if is_binary_content(&bytes) {
            return self.copy_file(source, target);
        }
        let text = String::from_utf8_lossy(&bytes);
        let crlf = uses_crlf(&text);
        let normalized = text.replace("\r\n", "\n");
        let mut rendered = self.engine.render(&normalized, self.context)?;
        if crlf {
            rendered = rendered.replace('\n', "\r\n");
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, rendered)?;
        Ok(FileOperation::Write)
    }

    /// Renders the whole project template into the project directory.
    pub fn generate(&self) -> Result<()> {
        debug!("Processing template {}", self.template_dir.display());
        let mut walker = WalkDir::new(self.template_dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let relative = relative_template_path(self.template_dir, entry.path())?;
            let Some(target) = self.target_for(&relative)? else {
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            };

            if entry.file_type().is_dir() {
                if self.copy_only.is_match(&relative) {
                    debug!("Copying directory without rendering: '{}'", relative);
                    self.copy_dir(entry.path(), &target)?;
                    walker.skip_current_dir();
                } else {
                    fs::create_dir_all(&target)?;
                    debug!("{}: '{}'", FileOperation::CreateDir, target.display());
                }
                continue;
            }

            let operation = self.generate_file(entry.path(), &relative, &target)?;
            if operation != FileOperation::Skip {
                copy_permissions(entry.path(), &target)?;
            }
            debug!("{}: '{}'", operation, target.display());
        }
        Ok(())
    }
}
