//! Library side of the `formdoc` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
