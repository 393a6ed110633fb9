use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::Deserialize;

use crate::error::Result;
use crate::labels::CommandPath;

/// One entry of the command definitions YAML.
///
/// `path` uses the structure grammar of [`CommandPath::parse`], e.g.
/// `"economy give|g"`.
#[derive(Deserialize, Debug, Clone)]
pub struct CommandDefinition {
    pub path: String,
    pub command: Vec<String>,
    pub description: Option<String>,
    pub working_directory: Option<String>,
    pub environment: Option<HashMap<String, String>>,
}

impl CommandDefinition {
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidArgument`] if `path` is malformed.
    pub fn command_path(&self) -> Result<CommandPath> {
        CommandPath::parse(&self.path)
    }
}

impl Display for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.path, description),
            None => formatter.write_str(&self.path),
        }
    }
}
