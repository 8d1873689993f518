//! CLI command definitions for the `palette` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod notes;
pub mod personas;
pub mod seed;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Art-therapy demo backend: persona chat and session notes.
#[derive(Parser)]
#[command(name = "palette", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "PALETTE_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Seed therapists and the demo children. Does nothing if already seeded.
    Seed,

    /// Show the most recent progress notes for a child.
    Notes {
        /// Child id.
        child_id: i64,

        /// Maximum number of notes to show.
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List personas and their therapist matches.
    Personas,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
