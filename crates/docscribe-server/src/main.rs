// Copyright 2026 Docscribe Contributors
// SPDX-License-Identifier: MIT

//! Docscribe CLI: run the API server or drive the generators offline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::de::DeserializeOwned;

use docscribe::codegen::{generate_sdk, generate_snippet};
use docscribe::config::DocscribeConfig;
use docscribe::export::{to_markdown, to_postman};
use docscribe::types::{ApiSchema, Endpoint};
use docscribe_server::AppState;

#[derive(Parser)]
#[command(
    name = "docscribe",
    about = "Turn API documentation into schemas, SDKs, snippets and exports",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Read configuration from this env file instead of `./.env`.
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Markdown,
    Postman,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API (default).
    Serve {
        /// Listen address (host:port). Overrides DOCSCRIBE_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Print a Python SDK for a schema file.
    Sdk {
        /// Path to a schema JSON file.
        schema: PathBuf,
    },

    /// Export a schema file as Markdown or a Postman collection.
    Export {
        /// Path to a schema JSON file.
        schema: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
    },

    /// Print a code snippet for a single endpoint file.
    Snippet {
        /// Path to an endpoint JSON file.
        endpoint: PathBuf,

        #[arg(long, default_value = "")]
        base_url: String,

        /// curl, javascript or python. Anything else renders Python.
        #[arg(long, default_value = "python")]
        language: String,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   docscribe completions bash > ~/.local/share/bash-completion/completions/docscribe
    ///   docscribe completions zsh > ~/.zfunc/_docscribe
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            let config = match &cli.env_file {
                Some(path) => DocscribeConfig::from_env_file(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => DocscribeConfig::from_env(),
            };
            let addr = addr.unwrap_or_else(|| config.addr.clone());
            let state = Arc::new(AppState::from_config(&config).await);
            docscribe_server::serve(&addr, state).await?;
        }

        Commands::Sdk { schema } => {
            let schema: ApiSchema = read_json(&schema)?;
            println!("{}", generate_sdk(&schema));
        }

        Commands::Export { schema, format } => {
            let schema: ApiSchema = read_json(&schema)?;
            match format {
                ExportFormat::Markdown => print!("{}", to_markdown(&schema)),
                ExportFormat::Postman => {
                    let collection = to_postman(&schema)?;
                    println!("{}", serde_json::to_string_pretty(&collection)?);
                }
            }
        }

        Commands::Snippet {
            endpoint,
            base_url,
            language,
        } => {
            let endpoint: Endpoint = read_json(&endpoint)?;
            println!("{}", generate_snippet(&endpoint, &base_url, &language));
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "docscribe", &mut std::io::stdout());
        }
    }

    Ok(())
}
