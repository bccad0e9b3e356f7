//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Activity log timeline.
///
/// Extracts dated events from a free-text activity log and renders them as a
/// table or a line chart.
#[derive(Debug, Parser)]
#[command(name = "atl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract events from an activity log, one event line per event.
    Events {
        /// Activity log to read (defaults to stdin).
        file: Option<PathBuf>,

        /// Output events as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render event lines as a table, newest first.
    Table {
        /// Event lines to read (defaults to stdin).
        file: Option<PathBuf>,

        /// Disable highlighting of rework rows.
        #[arg(long)]
        no_color: bool,
    },

    /// Render event lines as an SVG line chart.
    Chart {
        /// Event lines to read (defaults to stdin).
        file: Option<PathBuf>,

        /// Where to write the SVG (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
