//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure of the `ct`
//! binary using the `clap` crate.

use clap::Parser;
use command_tree_core::config::DEFAULT_ROOT_LABEL;
use command_tree_core::error::{Error, Result};

use crate::tokenizer::tokenize;

/// Command-line arguments for the `ct` command dispatcher.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use command_tree_cli::cli_args::Args;
///
/// let args = Args::parse_from(["ct", "economy", "give", "Steve", "100"]);
/// let (label, tokens) = args.invocation().unwrap();
/// assert_eq!(label, "ct");
/// assert_eq!(tokens, vec!["economy", "give", "Steve", "100"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the command definitions YAML.
    ///
    /// If not provided, defaults to `~/.command-tree/commands.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Print the rendered command instead of running it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Label of the root command definitions are registered under.
    ///
    /// Aliases may be given as `ct|commandtree`.
    #[arg(long, default_value = DEFAULT_ROOT_LABEL)]
    pub root_label: String,

    /// A complete command line, root label included, split by the built-in
    /// tokenizer. Double quotes keep a token with spaces together.
    ///
    /// # Examples
    /// ```bash
    /// ct --line 'ct economy give "Steve Jobs" 100'
    /// ```
    #[arg(long, short = 'L', conflicts_with = "tokens")]
    pub line: Option<String>,

    /// Command tokens following the root command.
    ///
    /// # Examples
    /// ```bash
    /// ct economy give Steve 100
    /// ```
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl Args {
    /// The label and argument tokens to dispatch.
    ///
    /// With `--line` the label is the line's first token; otherwise it is the
    /// first alias of `--root-label` and the trailing tokens are the arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is blank or has an unterminated quote.
    pub fn invocation(&self) -> Result<(String, Vec<String>)> {
        match &self.line {
            Some(line) => tokenize(line)?
                .ok_or_else(|| Error::invalid_argument("the command line is empty")),
            None => {
                let label = self
                    .root_label
                    .split(command_tree_core::labels::ALIAS_SEPARATOR)
                    .next()
                    .unwrap_or(DEFAULT_ROOT_LABEL)
                    .to_string();
                Ok((label, self.tokens.clone()))
            }
        }
    }
}
