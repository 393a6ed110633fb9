//! Loading command definitions and turning them into a command tree.
//!
//! Definitions are validated as a whole before anything is registered, so a
//! bad file never produces a partially built tree.

use std::fs::File;

use log::debug;

use crate::command_definitions::CommandDefinition;
use crate::error::{Error, Result};
use crate::handler::Handler;
use crate::interpolation::{get_templates, get_tokens, is_known_key};
use crate::labels::{CommandPath, Labels};
use crate::tree::CommandTree;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn validate_command(definition: &CommandDefinition) -> Result<()> {
    if definition.command.is_empty() {
        return Err(Error::MissingTokens(definition.path.clone()));
    }

    let templates = get_templates(&definition.command)?;
    let mut unknown: Vec<String> = get_tokens(&templates)
        .into_iter()
        .filter(|key| !is_known_key(key))
        .collect();
    unknown.sort();

    if !unknown.is_empty() {
        return Err(Error::invalid_argument(format!(
            "command `{definition}` uses unknown placeholder(s): {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

fn validate_definitions(definitions: &[CommandDefinition]) -> Result<Vec<CommandPath>> {
    let mut paths: Vec<CommandPath> = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let path = definition.command_path()?;
        validate_command(definition)?;

        if paths.iter().any(|existing| existing.same_canonical(&path)) {
            return Err(Error::duplicate_command(path.to_string()));
        }

        paths.push(path);
    }

    Ok(paths)
}

/// Loads and validates command definitions from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file holds no definitions
/// - A path is malformed or defined twice
/// - A command is empty or uses a placeholder no dispatch can provide
///
/// # Examples
///
/// ```no_run
/// use command_tree_core::file_handling::get_command_definitions;
///
/// let definitions = get_command_definitions("/home/me/.command-tree/commands.yml")?;
/// println!("Loaded {} commands", definitions.len());
/// # Ok::<(), command_tree_core::error::Error>(())
/// ```
pub fn get_command_definitions(config_path: &str) -> Result<Vec<CommandDefinition>> {
    let config_reader = get_reader("config", config_path)?;

    let definitions: Vec<CommandDefinition> =
        serde_yaml::from_reader(config_reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "config".to_string(),
                config_path.to_string(),
                e,
            )
        })?;

    if definitions.is_empty() {
        return Err(Error::empty_command_definition(config_path.to_string()));
    }

    validate_definitions(&definitions)?;
    debug!("Loaded {} command definition(s) from `{config_path}`", definitions.len());

    Ok(definitions)
}

/// Registers every definition below a new root labelled `root`, asking
/// `make_handler` for each definition's handler.
///
/// # Errors
///
/// Returns the first validation or registration error; no tree is returned
/// in that case.
pub fn build_command_tree<S, F>(
    root: Labels,
    definitions: &[CommandDefinition],
    mut make_handler: F,
) -> Result<CommandTree<S>>
where
    F: FnMut(&CommandDefinition) -> Handler<S>,
{
    let paths = validate_definitions(definitions)?;
    let mut tree = CommandTree::new(root);

    for (definition, path) in definitions.iter().zip(&paths) {
        debug!("Registering command `{definition}`");
        tree.add(make_handler(definition), path)?;
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn definition(path: &str, command: &[&str]) -> CommandDefinition {
        CommandDefinition {
            path: path.to_string(),
            command: command.iter().map(ToString::to_string).collect(),
            description: None,
            working_directory: None,
            environment: None,
        }
    }

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    #[test]
    fn test_validate_definitions_valid() {
        let definitions = vec![
            definition("economy give|g", &["echo", "{arg1}"]),
            definition("economy take", &["echo", "{args}"]),
        ];
        assert_eq!(validate_definitions(&definitions).unwrap().len(), 2);
    }

    #[test]
    fn test_validate_definitions_duplicate_path() {
        let definitions = vec![
            definition("economy give|g", &["echo"]),
            definition("Economy GIVE", &["echo"]),
        ];
        let result = validate_definitions(&definitions);
        assert!(matches!(result, Err(Error::DuplicateCommand { .. })));
    }

    #[test]
    fn test_validate_definitions_bad_path() {
        let definitions = vec![definition("economy |g", &["echo"])];
        assert!(matches!(
            validate_definitions(&definitions),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_command_empty() {
        let result = validate_command(&definition("economy", &[]));
        assert!(matches!(result, Err(Error::MissingTokens(path)) if path == "economy"));
    }

    #[test]
    fn test_validate_command_unknown_placeholder() {
        let result = validate_command(&definition("economy", &["echo", "{name}"]));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_build_command_tree() {
        let definitions = vec![
            definition("economy give|g", &["echo"]),
            definition("economy take", &["echo"]),
            definition("bank", &["echo"]),
        ];
        let root = Labels::parse("ct").unwrap();
        let tree: CommandTree<()> =
            build_command_tree(root, &definitions, |_| handler_fn(|_, _, _| true)).unwrap();

        assert!(tree.get("economy g").is_some());
        assert!(tree.get("economy take").is_some());
        assert!(tree.get("bank").is_some());
        assert!(tree.handler(tree.get("economy").unwrap()).is_none());
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_get_command_definitions_valid_yaml() {
        let temp_file = write_yaml(
            r#"
- path: "economy give|g"
  command: ["echo", "{label} {arg1}"]
  description: "Give money"
  environment:
    CURRENCY: "coins"
"#,
        );

        let definitions = get_command_definitions(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].path, "economy give|g");
        assert_eq!(definitions[0].description.as_deref(), Some("Give money"));
        assert_eq!(
            definitions[0].environment.as_ref().unwrap().get("CURRENCY"),
            Some(&"coins".to_string())
        );
    }

    #[test]
    fn test_get_command_definitions_empty_file() {
        let temp_file = write_yaml("[]");
        let result = get_command_definitions(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::EmptyCommandDefinition { .. })));
    }

    #[test]
    fn test_get_command_definitions_invalid_yaml() {
        let temp_file = write_yaml("invalid: yaml: content: [");
        let result = get_command_definitions(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_command_definitions_file_not_found() {
        let result = get_command_definitions("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
