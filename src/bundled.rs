//! The govcookiecutter template shipped inside the binary.
//! It is embedded at build time and unpacked into a temporary directory whenever no
//! `--template` is given, so an installed binary does not depend on the source tree.

use include_dir::{include_dir, Dir};
use log::debug;
use tempfile::TempDir;

use crate::error::Result;

/// Name replay records and `_template` use for the bundled template.
pub const BUNDLED_TEMPLATE_NAME: &str = "template";

static BUNDLED_TEMPLATE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/template");

/// Unpacks the bundled template. The directory is removed when the guard is dropped.
pub fn extract_bundled_template() -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix("govcookiecutter-").tempdir()?;
    BUNDLED_TEMPLATE.extract(dir.path())?;
    debug!("Extracted bundled template to {}", dir.path().display());
    Ok(dir)
}
