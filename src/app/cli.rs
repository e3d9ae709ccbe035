//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Glyph Recognizer - identify hand-drawn shapes from sensor traces
#[derive(Parser, Debug)]
#[command(name = "glyph-rec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a reference pattern from a trace file
    Store {
        /// Label to file the pattern under (e.g. "O", "X", "7")
        #[arg(short, long)]
        label: String,

        /// Trace file of [x, y] pairs, as captured from the sensor
        #[arg(short, long)]
        trace: PathBuf,
    },

    /// Identify a drawn glyph against the stored references
    Check {
        /// Trace file of [x, y] pairs to classify
        #[arg(short, long)]
        trace: PathBuf,
    },

    /// List stored reference patterns
    List {
        /// Show point counts and the library location
        #[arg(short, long)]
        detailed: bool,
    },

    /// Play tic-tac-toe by drawing symbols and digits
    Play,

    /// Initialize configuration and the library directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
