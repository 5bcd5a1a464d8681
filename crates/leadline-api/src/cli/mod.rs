//! CLI command definitions for the `ldln` binary.
//!
//! Uses clap derive macros for argument parsing. Two commands: `serve`
//! runs the REST API, `respond` runs one turn from a request file.

pub mod respond;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Conversational lead-capture orchestrator.
#[derive(Parser)]
#[command(name = "ldln", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the config file (default: ./leadline.toml when present).
    #[arg(long, global = true, env = "LEADLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bridge tracing spans to the OpenTelemetry stdout exporter.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Run one turn from a request file and print the result JSON.
    Respond {
        /// JSON file containing an agent turn request.
        #[arg(short, long)]
        file: PathBuf,
    },
}
