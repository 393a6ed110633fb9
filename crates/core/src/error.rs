use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::tree::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {}", .0)]
    InvalidArgument(String),

    #[error("Cannot have two commands with the same label `{}`", .label)]
    DuplicateCommand { label: String },

    #[error("The alias `{}` is already used by a sibling command", .label)]
    DuplicateAlias { label: String },

    #[error("Invalid operation: {}", .0)]
    InvalidOperation(String),

    #[error("No command found at `{}`", .0)]
    NoSuchChild(String),

    #[error("Unknown command node {}", .0)]
    UnknownNode(NodeId),

    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No commands were found in the command definition YAML. Is `{}` empty?", .path)]
    EmptyCommandDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("Command `{}` has an empty command template", .0)]
    MissingTokens(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub fn duplicate_command(label: impl Into<String>) -> Self {
        Self::DuplicateCommand {
            label: label.into(),
        }
    }

    pub fn duplicate_alias(label: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            label: label.into(),
        }
    }

    pub fn empty_command_definition(path: String) -> Self {
        Self::EmptyCommandDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
