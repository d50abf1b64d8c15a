//! Configuration constants and default value functions.

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "antrun.yaml";

/// Default Gant invocation. `{gantfile}` is the resolved build script path;
/// `{target}` is the requested target, dropped when empty.
pub const DEFAULT_GANT_COMMAND: &str = "gant -f {gantfile} {target}";

/// Default project file name, relative to the working directory.
pub const DEFAULT_PROJECT_FILE: &str = "build.yaml";

pub(crate) fn default_gant_command() -> String {
    DEFAULT_GANT_COMMAND.to_string()
}

pub(crate) fn default_project_file() -> String {
    DEFAULT_PROJECT_FILE.to_string()
}
