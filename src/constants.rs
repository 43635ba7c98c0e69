//! Common constants used throughout govcookiecutter.

/// Version of the running package.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the variable manifest inside a template directory
pub const MANIFEST_FILE: &str = "cookiecutter.json";

/// Key under which answers are exposed to templates (`{{ cookiecutter.name }}`)
pub const CONTEXT_KEY: &str = "cookiecutter";

/// User configuration file, relative to the home directory
pub const USER_CONFIG_FILE: &str = ".cookiecutterrc";

/// Environment variable overriding the user configuration file location
pub const USER_CONFIG_ENV: &str = "COOKIECUTTER_CONFIG";

/// Default clone directory for git templates, relative to the home directory
pub const COOKIECUTTERS_DIR: &str = ".cookiecutters";

/// Default replay directory, relative to the home directory
pub const REPLAY_DIR: &str = ".cookiecutter_replay";

/// Directory holding hook scripts, relative to the template root
pub const HOOKS_DIR: &str = "hooks";

/// Hook executed before the project tree is rendered
pub const PRE_GEN_HOOK: &str = "pre_gen_project";

/// Hook executed after the project tree is rendered
pub const POST_GEN_HOOK: &str = "post_gen_project";

/// Private manifest key listing glob patterns copied without rendering
pub const COPY_WITHOUT_RENDER_KEY: &str = "_copy_without_render";

/// Private manifest key recording the template source
pub const TEMPLATE_KEY: &str = "_template";
