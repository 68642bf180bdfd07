//! Contract Audit Server
//!
//! First-pass legal risk triage for contract text. Each clause is scored
//! against a fixed label taxonomy by a zero-shot classifier, routed to a
//! risk or safe finding, and the document gets an executive summary.
//!
//! ## Commands
//!
//! - `serve`: REST API (`/health`, `/api/analyze`, `/api/taxonomy`)
//! - `analyze`: one-shot analysis of a text file, JSON or plain text output
//!
//! Backends are built once per process and shared across requests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use audit_engine::{render, AuditConfig, AuditEngine};
use clap::{Parser, Subcommand, ValueEnum};
use inference_client::{build_backends, InferenceConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;

use state::AppState;

/// Command-line arguments for the audit server
#[derive(Parser, Debug)]
#[command(name = "audit-api")]
#[command(about = "Contract clause risk triage server")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Build the inference backends before accepting requests
        #[arg(long)]
        warm: bool,
    },

    /// Analyze one text file and print the report
    Analyze {
        /// Extracted contract text
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AuditConfig::from_env()?;
    let inference = InferenceConfig::from_env()?;
    debug!("Audit config: {:?}", config);
    debug!("Inference config: {:?}", inference);

    match cli.command {
        Command::Serve { port, host, warm } => serve(config, inference, &host, port, warm).await,
        Command::Analyze { file, format } => analyze(config, inference, file, format).await,
    }
}

async fn serve(
    config: AuditConfig,
    inference: InferenceConfig,
    host: &str,
    port: u16,
    warm: bool,
) -> anyhow::Result<()> {
    info!("Starting audit server on {}:{}", host, port);

    let state = AppState::new(config, Arc::new(move || build_backends(&inference)));
    if warm {
        if let Err(e) = state.warm().await {
            warn!("Backend warm-up failed, will retry on first request: {}", e);
        }
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn analyze(
    config: AuditConfig,
    inference: InferenceConfig,
    file: PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;

    let backends = Arc::new(build_backends(&inference)?);
    let engine = AuditEngine::new(config, backends)?;

    let progress = |done: usize, total: usize| debug!("Classified {}/{} clauses", done, total);
    let report = engine.analyze_with_progress(&text, &progress).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render::render_text(&report)),
    }

    Ok(())
}
