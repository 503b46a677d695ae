//! Command handlers for CLI subcommands
//!
//! This module contains the implementations for each CLI subcommand,
//! providing a clean separation between argument parsing and command execution.

mod init;
mod mine;

pub use init::{handle_init_command, init_config_in};
pub use mine::{handle_mine_command, resolve_settings, write_outcome, MineConfig, RunSettings};
