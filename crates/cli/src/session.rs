//! The sender passed to every command handler the CLI dispatches to.

use std::env;

use command_tree_core::config;

/// Who is running a command and how it should be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// `$USER` (or `$USERNAME`), `"unknown"` when neither is set.
    pub user: String,
    /// Shell the rendered command line is handed to.
    pub shell: String,
    /// Print the rendered command instead of running it.
    pub dry_run: bool,
}

impl Session {
    #[must_use]
    pub fn new(user: impl Into<String>, shell: impl Into<String>, dry_run: bool) -> Self {
        Self {
            user: user.into(),
            shell: shell.into(),
            dry_run,
        }
    }

    /// A session for the current process, reading the user and shell from
    /// the environment.
    #[must_use]
    pub fn from_env(dry_run: bool) -> Self {
        let user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());

        Self::new(user, config::get_shell(), dry_run)
    }
}
