use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::debug;

use command_tree_cli::cli_args::Args;
use command_tree_cli::session::Session;
use command_tree_cli::shell_command::ShellCommand;
use command_tree_core::error::{Error, Result};
use command_tree_core::labels::Labels;
use command_tree_core::tree::CommandTree;
use command_tree_core::{config, file_handling};

/// Load configuration and build the command tree
fn initialize_tree(args: &Args) -> Result<CommandTree<Session>> {
    let config_path = config::get_config_path(args.config_path.as_deref());
    debug!("Config path: `{}`", config_path);

    let definitions = file_handling::get_command_definitions(&config_path)?;
    let root = Labels::parse(&args.root_label)?;

    file_handling::build_command_tree(root, &definitions, ShellCommand::handler)
}

fn execute() -> Result<bool> {
    let args = Args::parse();
    let (label, tokens) = args.invocation()?;
    let tree = initialize_tree(&args)?;

    let root_labels = tree
        .labels(tree.root())
        .ok_or_else(|| Error::Misc("command tree has no root".to_string()))?;
    if !root_labels.matches(&label) {
        debug!("`{label}` does not match the root `{root_labels}`");
        return Err(Error::NoSuchChild(label));
    }

    let route = tree.route(&label, &tokens);
    if !route.is_handled() {
        return Err(Error::NoSuchChild(
            std::iter::once(label.as_str())
                .chain(tokens.iter().map(String::as_str))
                .join(" "),
        ));
    }

    let session = Session::from_env(args.dry_run);
    debug!("Dispatching to command node {} as {}", route.node, session.user);

    Ok(route.invoke(&session))
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
