// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flotilla")]
#[command(about = "Keeps a fleet's floating IP on the newest live instance")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(long, short, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Structured JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new flotilla.yml configuration file
    Init {
        /// Fleet name
        #[arg(long)]
        fleet: Option<String>,

        /// Target machine-image identifier
        #[arg(long)]
        image: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Point the fleet's floating IP at the newest instance
    Assign {
        /// Confirmation timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Delay between confirmation attempts in seconds (overrides config)
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Create a floating IP for a brand-new fleet
    CreateIp {
        /// Confirmation timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Delay between confirmation attempts in seconds (overrides config)
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Show the canonical instance and current IP assignment
    Status,

    /// List fleet instances, optionally filtered by field values
    List {
        /// Keep instances whose field equals/contains the value (key=value)
        #[arg(long, value_name = "KEY=VALUE")]
        filter: Vec<String>,

        /// Keep instances whose field does not equal/contain the value (key=value)
        #[arg(long, value_name = "KEY=VALUE")]
        exclude: Vec<String>,
    },

    /// Destroy instances left behind by a completed rollover
    Prune {
        /// Select idle non-IP-holders instead of instances older than the IP holder
        #[arg(long)]
        idle: bool,

        /// Print the candidates without destroying anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Wait until the canonical instance reports active
    Wait {
        /// Maximum number of readiness probes (overrides config)
        #[arg(long)]
        retries: Option<u32>,

        /// Delay between probes in seconds (overrides config)
        #[arg(long)]
        delay: Option<u64>,
    },
}
