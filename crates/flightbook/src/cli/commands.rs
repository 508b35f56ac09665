//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Interactive shell arguments.
#[derive(Debug, Default, Args)]
pub struct ShellCommand {
    /// Read menu answers from this file instead of the terminal
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Flight listing arguments.
#[derive(Debug, Args)]
pub struct FlightsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
