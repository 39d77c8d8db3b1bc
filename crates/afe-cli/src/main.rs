// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
mod commands;

use afe_config::{load_config, validate_config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "afe", version, about = "Alamofire-compatible error catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog codes.
    Codes {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Describe a raw error code.
    Explain {
        /// Integer code, e.g. -6006.
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },

    /// Build an error and print it as JSON.
    Make {
        /// Integer code; need not be a catalog value.
        #[arg(long, allow_negative_numbers = true)]
        code: i64,

        /// Human-readable failure reason.
        #[arg(long)]
        reason: String,

        /// Domain override.
        #[arg(long)]
        domain: Option<String>,

        /// Rejected content type (for -6002).
        #[arg(long)]
        content_type: Option<String>,

        /// Rejected status code (for -6003).
        #[arg(long)]
        status_code: Option<u16>,
    },

    /// Print the JSON schema of a serialized error.
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("load config")?;
    let warnings = validate_config(&config).context("validate config")?;

    let filter = if cli.debug {
        EnvFilter::new("afe=debug")
    } else {
        EnvFilter::new(format!(
            "afe={}",
            config.log_level.as_deref().unwrap_or("info")
        ))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    for w in &warnings {
        warn!(target: "afe.config", "{w}");
    }

    let out = match cli.command {
        Commands::Codes { json } => commands::codes(json)?,
        Commands::Explain { code } => commands::explain(code),
        Commands::Make {
            code,
            reason,
            domain,
            content_type,
            status_code,
        } => commands::make(
            &config,
            commands::MakeArgs {
                code,
                reason,
                domain,
                content_type,
                status_code,
            },
        )?,
        Commands::Schema => commands::schema()?,
    };
    println!("{out}");
    Ok(())
}
