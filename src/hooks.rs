//! Pre and post generation hook processing.
//! Hook scripts live in the template's `hooks/` directory and are rendered with the
//! answers before they run inside the generated project directory.

use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::constants::{HOOKS_DIR, POST_GEN_HOOK, PRE_GEN_HOOK};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// Returns true if `file_name` is a runnable script for `hook_name`.
///
/// The file stem must equal the hook name, and editor backups (`~` suffix) are skipped.
pub fn is_valid_hook(file_name: &str, hook_name: &str) -> bool {
    if file_name.ends_with('~') {
        return false;
    }
    if hook_name != PRE_GEN_HOOK && hook_name != POST_GEN_HOOK {
        return false;
    }
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    stem == hook_name
}

/// Finds the scripts for `hook_name` in the template root, sorted by file name.
pub fn find_hooks<P: AsRef<Path>>(template_dir: P, hook_name: &str) -> Result<Vec<PathBuf>> {
    let hooks_dir = template_dir.as_ref().join(HOOKS_DIR);
    if !hooks_dir.is_dir() {
        debug!("No hooks dir in {}", template_dir.as_ref().display());
        return Ok(Vec::new());
    }

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(&hooks_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        if entry.path().is_file() && is_valid_hook(&file_name.to_string_lossy(), hook_name) {
            scripts.push(entry.path());
        }
    }
    scripts.sort();
    Ok(scripts)
}

fn interpreter_for(script: &Path) -> Option<&'static str> {
    match script.extension().and_then(|ext| ext.to_str()) {
        Some("py") if cfg!(windows) => Some("python"),
        Some("py") => Some("python3"),
        _ => None,
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Runs a script with `cwd` as working directory and the context on stdin.
///
/// # Errors
/// * `Error::HookError` if the script cannot be executed or exits unsuccessfully
pub fn run_script<P: AsRef<Path>>(
    script_path: P,
    cwd: &Path,
    context: &serde_json::Value,
) -> Result<()> {
    let script_path = script_path.as_ref();
    make_executable(script_path)?;

    let mut command = match interpreter_for(script_path) {
        Some(interpreter) => {
            let mut command = Command::new(interpreter);
            command.arg(script_path);
            command
        }
        None => Command::new(script_path),
    };

    debug!("Running hook {}", script_path.display());
    let mut child = command
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| match e.raw_os_error() {
            // ENOEXEC
            Some(8) => Error::HookError(
                "Hook script failed, might be an empty file or missing a shebang".to_string(),
            ),
            _ => Error::HookError(format!("Hook script failed ({})", e)),
        })?;

    // Write context to stdin; scripts that do not read it close the pipe early.
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(context.to_string().as_bytes()) {
            debug!("Hook did not consume its stdin: {}", e);
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "Hook script failed (exit status: {})",
            status.code().map_or_else(|| status.to_string(), |code| code.to_string())
        )));
    }

    Ok(())
}

/// Renders a hook script with the context into a temporary file and runs it.
pub fn run_script_with_context<P: AsRef<Path>>(
    script_path: P,
    cwd: &Path,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> Result<()> {
    let script_path = script_path.as_ref();
    let contents = std::fs::read_to_string(script_path)?;
    let rendered = engine.render(&contents, context)?;

    let suffix = script_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let mut file = tempfile::Builder::new().prefix("hook-").suffix(&suffix).tempfile()?;
    file.write_all(rendered.as_bytes())?;
    file.flush()?;
    // Close the handle before exec, the path is removed when dropped.
    let temp_path = file.into_temp_path();

    run_script(&temp_path, cwd, context)
}

/// Runs every script for `hook_name` found in the template root.
pub fn run_hook<P: AsRef<Path>>(
    template_dir: P,
    hook_name: &str,
    project_dir: &Path,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> Result<()> {
    let scripts = find_hooks(template_dir, hook_name)?;
    if scripts.is_empty() {
        debug!("No {} hook found", hook_name);
        return Ok(());
    }
    for script in scripts {
        run_script_with_context(&script, project_dir, context, engine)?;
    }
    Ok(())
}
