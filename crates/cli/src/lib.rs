//! Command Tree CLI Library
//!
//! This crate provides the `ct` binary: it loads command definitions from a
//! YAML file, registers them in a command tree below a root label, and
//! dispatches a command line to the most specific definition, whose shell
//! command template is rendered and run.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`tokenizer`]: Splitting a raw command line into label and arguments
//! - [`session`]: The sender every handler receives
//! - [`shell_command`]: Handlers that render and run command templates
//!
//! # Examples
//!
//! ```bash
//! # Dispatch `economy give Steve 100` below the default `ct` root
//! ct economy give Steve 100
//!
//! # Same thing, from a single line
//! ct --line 'ct economy give Steve 100'
//!
//! # Show what would run
//! ct --dry-run economy give Steve 100
//! ```

pub mod cli_args;
pub mod session;
pub mod shell_command;
pub mod tokenizer;
