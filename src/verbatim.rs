//! Copy-only path patterns.
//! Paths matching a `_copy_without_render` pattern are copied to the output
//! byte-for-byte instead of being rendered.

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::constants::{CONTEXT_KEY, COPY_WITHOUT_RENDER_KEY};
use crate::error::{Error, Result};

/// Reads the `_copy_without_render` patterns from a rendering context.
pub fn copy_without_render_patterns(context: &serde_json::Value) -> Vec<String> {
    context
        .get(CONTEXT_KEY)
        .and_then(|answers| answers.get(COPY_WITHOUT_RENDER_KEY))
        .and_then(|value| value.as_array())
        .map(|patterns| {
            patterns.iter().filter_map(|p| p.as_str().map(str::to_string)).collect()
        })
        .unwrap_or_default()
}

/// Compiles the copy-only patterns of a context into a set of globs.
///
/// # Notes
/// - Patterns are matched against paths relative to the project template directory
/// - `*` also matches path separators, like shell `fnmatch`
/// - An invalid pattern results in a `ManifestError`
///
/// # Example
/// ```ignore
/// "_copy_without_render": ["*.html", "static/*"]
/// ```
pub fn build_copy_only_set(context: &serde_json::Value) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in copy_without_render_patterns(context) {
        debug!("Copying without render: {}", pattern);
        builder.add(Glob::new(&pattern).map_err(|e| Error::ManifestError {
            path: COPY_WITHOUT_RENDER_KEY.to_string(),
            reason: format!("invalid pattern '{}': {}", pattern, e),
        })?);
    }
    builder.build().map_err(|e| Error::ManifestError {
        path: COPY_WITHOUT_RENDER_KEY.to_string(),
        reason: e.to_string(),
    })
}
