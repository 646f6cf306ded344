//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "recsync",
    version,
    about = "Synchronized playback of session recordings",
    long_about = None
)]
pub struct Cli {
    /// Log drift corrections and state changes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a session file for data integrity errors
    Validate {
        /// Session JSON file
        session: PathBuf,
    },

    /// Show which chat line, slide, cursor and view are current at given times
    Inspect {
        /// Session JSON file
        session: PathBuf,

        /// Playback time in seconds (repeatable)
        #[arg(long = "at", required = true, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<f64>,
    },

    /// Play a session on two simulated players and report drift corrections
    Simulate {
        /// Session JSON file
        session: PathBuf,

        /// Initial secondary offset from the master, in seconds
        #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
        offset: f64,

        /// Seconds to play (defaults to the session duration)
        #[arg(long)]
        duration: Option<f64>,

        /// Seconds between time updates
        #[arg(long, default_value_t = 0.25)]
        step: f64,

        /// Secondary clock speed relative to the master (1.0 = exact)
        #[arg(long, default_value_t = 1.0)]
        skew: f64,

        /// Keep the secondary stalled until this master time
        #[arg(long)]
        stall_until: Option<f64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}
