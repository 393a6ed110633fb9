//! Tests for dispatching tokenized command lines to shell command handlers

use command_tree_cli::session::Session;
use command_tree_cli::shell_command::ShellCommand;
use command_tree_cli::tokenizer::tokenize;
use command_tree_core::command_definitions::CommandDefinition;
use command_tree_core::file_handling::build_command_tree;
use command_tree_core::labels::Labels;
use command_tree_core::tree::CommandTree;

fn definition(path: &str, command: &[&str]) -> CommandDefinition {
    CommandDefinition {
        path: path.to_string(),
        command: command.iter().map(ToString::to_string).collect(),
        description: None,
        working_directory: None,
        environment: None,
    }
}

fn tree() -> CommandTree<Session> {
    let definitions = vec![
        definition("economy give|g", &["echo", "{label}", "{arg1}", "{arg2}"]),
        definition("economy take", &["echo", "{args}"]),
        definition("ping", &["echo", "pong"]),
    ];

    build_command_tree(
        Labels::parse("ct").unwrap(),
        &definitions,
        ShellCommand::handler,
    )
    .unwrap()
}

fn dry_run() -> Session {
    Session::new("steve", "/bin/sh", true)
}

#[test]
fn test_line_routes_to_definition() {
    let tree = tree();
    let (label, args) = tokenize("ct economy G \"Steve Jobs\" 100").unwrap().unwrap();

    let route = tree.route(&label, &args);
    assert!(route.is_handled());
    assert_eq!(route.node, tree.get("economy give").unwrap());
    assert_eq!(route.label, "G");
    assert_eq!(route.args, ["Steve Jobs".to_string(), "100".to_string()]);
    assert!(route.invoke(&dry_run()));
}

#[test]
fn test_group_without_command_is_unhandled() {
    let tree = tree();
    let (label, args) = tokenize("ct economy steal").unwrap().unwrap();

    let route = tree.route(&label, &args);
    assert_eq!(route.node, tree.get("economy").unwrap());
    assert!(!route.is_handled());
    assert!(!tree.dispatch(&dry_run(), &label, &args));
}

#[test]
fn test_missing_template_argument_is_unhandled() {
    let tree = tree();
    let (label, args) = tokenize("ct economy give Steve").unwrap().unwrap();

    assert!(tree.route(&label, &args).is_handled());
    assert!(!tree.dispatch(&dry_run(), &label, &args));
}

#[cfg(unix)]
#[test]
fn test_dispatch_runs_command() {
    let tree = tree();
    let session = Session::new("steve", "/bin/sh", false);
    let (label, args) = tokenize("ct PING").unwrap().unwrap();

    assert!(tree.dispatch(&session, &label, &args));
}
