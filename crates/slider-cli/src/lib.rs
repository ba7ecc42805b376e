#![forbid(unsafe_code)]

//! Headless driver for `slider-core`.
//!
//! Each subcommand is a single stateless step: build a puzzle, or restore one
//! from a saved session, apply some input, print the board, and optionally
//! save the result for the next invocation.

pub mod cli;
pub mod drag;
pub mod error;
pub mod logging;
pub mod new_game;
pub mod play;
pub mod summary;

pub use cli::run_from_env;
pub use error::{CliError, Result};
