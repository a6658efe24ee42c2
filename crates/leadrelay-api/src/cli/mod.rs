//! CLI command definitions for the `leadrelay` binary.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Lead-capture chat relay and terminal widget.
#[derive(Parser)]
#[command(name = "leadrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(
        long,
        global = true,
        env = "LEADRELAY_CONFIG",
        default_value = "leadrelay.toml"
    )]
    pub config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server (`POST /chat`, `GET /health`, static site).
    Serve {
        /// Interface to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Static site directory (overrides `server.web_dir`).
        #[arg(long)]
        web_dir: Option<String>,

        /// OpenAI-compatible base URL (overrides `relay.base_url`).
        #[arg(long, env = "LEADRELAY_BASE_URL")]
        base_url: Option<String>,
    },

    /// Open the chat widget in the terminal against a running relay.
    Chat {
        /// Relay server base URL (overrides `client.relay_url`).
        #[arg(long, env = "LEADRELAY_URL")]
        url: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default log filter derived from `-v` / `--quiet`, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,leadrelay=debug",
            _ => "trace",
        }
    }
}
