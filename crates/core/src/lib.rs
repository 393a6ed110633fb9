//! Command Tree Core Library
//!
//! This crate provides a hierarchical command dispatcher: a tree of named
//! commands and subcommands, each optionally holding a handler, that routes a
//! tokenized command line to the most specific handler along the path of
//! matching labels.
//!
//! # Key Features
//!
//! - **Command Tree**: Register commands and nested subcommands with aliases
//! - **Dispatch**: Route a label and its arguments to the deepest matching handler
//! - **Lookup**: Shallow, path-based and deep (whole subtree) searches
//! - **Shared Trees**: Lock-guarded trees for hosts dispatching from several threads
//! - **Command Definitions**: Build a tree of shell command templates from YAML
//!
//! # Examples
//!
//! ```
//! use command_tree_core::handler::handler_fn;
//! use command_tree_core::tree::CommandTree;
//!
//! let mut tree = CommandTree::<String>::named("economy")?;
//! tree.register(
//!     handler_fn(|sender: &String, label, args| {
//!         println!("{sender} ran {label} with {args:?}");
//!         true
//!     }),
//!     "give|g",
//! )?;
//!
//! let args = vec!["g".to_string(), "Steve".to_string(), "100".to_string()];
//! assert!(tree.dispatch(&"console".to_string(), "economy", &args));
//! # Ok::<(), command_tree_core::error::Error>(())
//! ```

pub mod command_definitions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod handler;
pub mod interpolation;
pub mod labels;
pub mod shared;
pub mod tree;

pub use dispatch::Route;
pub use error::{Error, Result};
pub use handler::{handler_fn, CommandHandler, Handler};
pub use labels::{CommandPath, Labels};
pub use shared::SharedCommandTree;
pub use tree::{CommandTree, NodeId};
