//! ctriage-web - Comment Triage service
//!
//! Serves the browser UI and JSON API (`serve`), or classifies one file from
//! the command line and writes the CSV export (`classify`).

use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ctriage_common::categories::ALL_CATEGORIES;
use ctriage_common::config::{load_toml_config, TomlConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ctriage_web::config::{gemini_config, resolve_api_key};
use ctriage_web::pipeline::{classify_upload, Workspace};
use ctriage_web::services::{export, CommentClassifier, GeminiClient};
use ctriage_web::AppState;

/// Command-line arguments for ctriage-web
#[derive(Parser, Debug)]
#[command(name = "ctriage-web")]
#[command(about = "Classify audience comments and suggest replies")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, global = true, env = "CTRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Classification API key (overrides environment and TOML)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Host to bind (serve)
    #[arg(long, global = true, env = "CTRIAGE_HOST")]
    host: Option<String>,

    /// Port to listen on (serve)
    #[arg(short, long, global = true, env = "CTRIAGE_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run the web service (default)
    Serve,
    /// Classify a comment file once and write the results as CSV
    Classify {
        /// Text or CSV file with one comment per line
        input: PathBuf,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only export results in this category
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Write only the comment and category columns
        #[arg(long)]
        no_replies: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing (RUST_LOG overrides the configured level)
    let level = &toml_config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ctriage_web={level},ctriage_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_key = resolve_api_key(args.api_key.as_deref(), &toml_config)?;
    let client = GeminiClient::new(gemini_config(&toml_config, api_key))
        .context("Failed to create classification client")?;
    info!("Classification model: {}", client.model());
    let classifier: Arc<dyn CommentClassifier> = Arc::new(client);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&toml_config, classifier, args.host, args.port).await,
        Command::Classify {
            input,
            output,
            category,
            no_replies,
        } => {
            classify_file(classifier, &input, output.as_deref(), &category, !no_replies).await
        }
    }
}

async fn serve(
    toml_config: &TomlConfig,
    classifier: Arc<dyn CommentClassifier>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| toml_config.host().to_string());
    let port = port.unwrap_or_else(|| toml_config.port());

    info!("Starting ctriage-web (Comment Triage)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(classifier);
    let app = ctriage_web::build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// One-shot batch run: ingest, classify, export
async fn classify_file(
    classifier: Arc<dyn CommentClassifier>,
    input: &Path,
    output: Option<&Path>,
    selector: &str,
    include_replies: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let workspace = Workspace::new();
    let outcome = classify_upload(&workspace, classifier.as_ref(), &content).await?;

    let ingestion = &outcome.ingestion;
    eprintln!(
        "{} comments read{}{}",
        ingestion.len(),
        if ingestion.header_dropped { " (header skipped)" } else { "" },
        if ingestion.truncated > 0 {
            format!(", {} lines over the limit ignored", ingestion.truncated)
        } else {
            String::new()
        }
    );

    let Some(state) = outcome.state else {
        eprintln!("No comments found in {}", input.display());
        return Ok(());
    };

    for count in state.stats() {
        eprintln!("{:>24}  {}", count.category, count.count);
    }

    let rows = state.filtered(selector);
    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    if include_replies {
        export::write_csv(&rows, out)?;
    } else {
        export::write_labels_csv(&rows, out)?;
    }
    if let Some(path) = output {
        info!("Saved {} results to {}", rows.len(), path.display());
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_port_env_applies_without_subcommand() {
        std::env::set_var("CTRIAGE_PORT", "6123");

        let args = Args::parse_from(["ctriage-web"]);
        assert_eq!(args.port, Some(6123));
        assert_eq!(args.command, None);

        let args = Args::parse_from(["ctriage-web", "serve"]);
        assert_eq!(args.port, Some(6123));

        std::env::remove_var("CTRIAGE_PORT");
    }

    #[test]
    #[serial]
    fn test_cli_port_beats_env() {
        std::env::set_var("CTRIAGE_PORT", "6123");

        let args = Args::parse_from(["ctriage-web", "serve", "--port", "7001"]);
        assert_eq!(args.port, Some(7001));

        std::env::remove_var("CTRIAGE_PORT");
    }

    #[test]
    #[serial]
    fn test_classify_no_replies_flag() {
        std::env::remove_var("CTRIAGE_PORT");

        let args = Args::parse_from(["ctriage-web", "classify", "in.csv", "--no-replies"]);
        assert_eq!(args.port, None);
        assert_eq!(
            args.command,
            Some(Command::Classify {
                input: PathBuf::from("in.csv"),
                output: None,
                category: ALL_CATEGORIES.to_string(),
                no_replies: true,
            })
        );
    }
}
