//! The `waymark` command-line front end.
//!
//! Wizards are rendered on a line-oriented terminal, or answered from a file
//! with `run --answers`. Progress-page tasks run through the system shell.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod scripted;
pub mod settings;
pub mod tasks;
pub mod template;
pub mod terminal;

pub use cli::{Cli, Cmd};
pub use settings::Settings;
