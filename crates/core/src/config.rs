//! Configuration defaults and path resolution for command-tree.
//!
//! Paths may use shell shorthands such as `~`, which are expanded before use.

use std::env;

/// Default path of the command definitions file
const DEFAULT_CONFIG_PATH: &str = "~/.command-tree/commands.yml";

/// Label of the root command every definition path is registered under
pub const DEFAULT_ROOT_LABEL: &str = "ct";

/// Shell used to run command templates when `$SHELL` is not set
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Resolves the command definitions path, falling back to
/// `~/.command-tree/commands.yml`.
///
/// # Examples
///
/// ```
/// use command_tree_core::config::get_config_path;
///
/// let custom_path = get_config_path(Some("/path/to/commands.yml"));
/// assert_eq!(custom_path, "/path/to/commands.yml");
///
/// let default_path = get_config_path(None);
/// assert!(default_path.ends_with(".command-tree/commands.yml"));
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// The shell command templates are handed to: `$SHELL`, else [`DEFAULT_SHELL`].
#[must_use]
pub fn get_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string())
}

/// Expands `~` in a definition's working directory, if it has one.
#[must_use]
pub fn expand_working_directory(working_directory: Option<&str>) -> Option<String> {
    working_directory.map(|directory| shellexpand::tilde(directory).to_string())
}
