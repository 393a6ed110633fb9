//! Command handlers backed by shell command templates.

use std::sync::Arc;

use command_tree_core::command_definitions::CommandDefinition;
use command_tree_core::error::Result;
use command_tree_core::handler::{CommandHandler, Handler};
use command_tree_core::{config, execution, interpolation};
use itertools::Itertools;
use log::{debug, error};

use crate::session::Session;

/// Runs a definition's command template with the label and arguments a
/// dispatch delivered.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    definition: CommandDefinition,
}

impl ShellCommand {
    #[must_use]
    pub fn new(definition: CommandDefinition) -> Self {
        Self { definition }
    }

    /// Handler factory for [`command_tree_core::file_handling::build_command_tree`].
    #[must_use]
    pub fn handler(definition: &CommandDefinition) -> Handler<Session> {
        Arc::new(Self::new(definition.clone()))
    }

    #[must_use]
    pub fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    /// Renders the command line for `label` and `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if a template refers to an argument that was not
    /// given, e.g. `{arg2}` with a single argument.
    pub fn render(&self, label: &str, args: &[String]) -> Result<String> {
        let templates = interpolation::get_templates(&self.definition.command)?;
        let context = interpolation::build_context(label, args);

        Ok(interpolation::interpolate_command(&context, &templates)?.join(" "))
    }

    /// Renders and runs the command on behalf of `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, the shell cannot be started, or
    /// the command exits with a non-zero status.
    pub fn run(&self, session: &Session, label: &str, args: &[String]) -> Result<()> {
        let line = self.render(label, args)?;
        self.print_command_and_environment(&line);

        if session.dry_run {
            println!("Dry run is specified, exiting without executing.");
            return Ok(());
        }

        debug!("Running `{}` for {} with {}", self.definition.path, session.user, session.shell);
        let working_directory =
            config::expand_working_directory(self.definition.working_directory.as_deref());
        let command = execution::shell_command(&session.shell, working_directory.as_deref(), &line);

        execution::execute_command(command, self.definition.environment.as_ref())
    }

    fn print_command_and_environment(&self, line: &str) {
        println!("Executing command:\n{line}");

        if let Some(environment) = self.definition.environment.as_ref() {
            println!("With environment:");
            for (key, value) in environment.iter().sorted() {
                println!("\t\"{key}\": \"{value}\"");
            }
        }
    }
}

impl CommandHandler<Session> for ShellCommand {
    fn invoke(&self, sender: &Session, label: &str, args: &[String]) -> bool {
        match self.run(sender, label, args) {
            Ok(()) => true,
            Err(e) => {
                error!("`{}` failed: {e}", self.definition.path);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_tree_core::error::Error;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn shell_command(command: &[&str]) -> ShellCommand {
        ShellCommand::new(CommandDefinition {
            path: "economy give|g".to_string(),
            command: strings(command),
            description: None,
            working_directory: None,
            environment: None,
        })
    }

    #[test]
    fn test_render() {
        let command = shell_command(&["echo", "{label}:", "{arg1}", "gets", "{arg2}"]);
        let line = command.render("g", &strings(&["Steve", "100"])).unwrap();
        assert_eq!(line, "echo g: Steve gets 100");
    }

    #[test]
    fn test_render_all_args() {
        let command = shell_command(&["echo", "{args}"]);
        let line = command.render("give", &strings(&["a", "b", "c"])).unwrap();
        assert_eq!(line, "echo a b c");
    }

    #[test]
    fn test_render_missing_argument() {
        let command = shell_command(&["echo", "{arg2}"]);
        let result = command.render("give", &strings(&["Steve"]));
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_dry_run_is_handled() {
        let command = shell_command(&["false"]);
        let session = Session::new("steve", "/this/shell/does/not/exist", true);
        assert!(command.invoke(&session, "give", &[]));
    }

    #[test]
    fn test_failed_render_is_unhandled() {
        let command = shell_command(&["echo", "{arg1}"]);
        let session = Session::new("steve", "/bin/sh", true);
        assert!(!command.invoke(&session, "give", &[]));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_exit_status() {
        let session = Session::new("steve", "/bin/sh", false);
        assert!(shell_command(&["true"]).invoke(&session, "give", &[]));
        assert!(!shell_command(&["exit", "{arg1}"]).invoke(&session, "give", &strings(&["4"])));
    }
}
