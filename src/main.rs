use analyzer::{Analyzer, Session, SessionReport};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use configuration::{LoggingSettings, OutputFormat, Settings, load_config};
use ingest::Ingestor;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

mod render;

/// The main entry point for the sales performance analyzer.
fn main() -> anyhow::Result<()> {
    // Pick up SALESPERF__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(top) = cli.top {
        settings.analysis.top_products = top;
        settings.validate()?;
    }

    init_logging(&settings.logging)?;

    let session_id = Uuid::new_v4();
    let span = tracing::info_span!("session", id = %session_id);
    let _guard = span.enter();

    handle_analyze(&cli, &settings, session_id)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales performance through probabilistic analysis.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The salesperson whose log is being analysed. Must be on the configured roster.
    #[arg(long, short)]
    name: String,

    /// The sales file to analyse (.csv, .parquet, .xls or .xlsx).
    #[arg(long, short)]
    file: PathBuf,

    /// Path to a TOML configuration file. Defaults to ./config.toml when present.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// How to present the results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Override how many products the win-rate ranking shows.
    #[arg(long)]
    top: Option<usize>,
}

/// The JSON document printed with `--format json`.
#[derive(Serialize)]
struct Envelope<'a> {
    session_id: Uuid,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    session: &'a SessionReport,
}

fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level. Logs go to stderr so JSON on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Runs one session: select name, load file, compute, render.
fn handle_analyze(cli: &Cli, settings: &Settings, session_id: Uuid) -> anyhow::Result<()> {
    // 1. Select
    let session = Session::open(&cli.name, &settings.roster)?;

    // 2. Load and validate
    let log = Ingestor::new(settings.ingestion.clone())
        .load(&cli.file)
        .with_context(|| format!("An error occurred while processing {}", cli.file.display()))?;

    // 3. Compute
    let analyzer = Analyzer::new(settings.analysis.clone());
    let result = analyzer.run(&session, &log)?;

    // 4. Render
    match cli.format {
        OutputFormat::Json => {
            let envelope = Envelope {
                session_id,
                generated_at: Utc::now(),
                session: &result,
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Table => {
            let file_name = cli
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("You selected: {}", session.salesperson());
            println!("{file_name} has been cleaned and validated.\n");

            println!("{}'s Performance:", session.salesperson());
            println!("{}\n", render::summary_table(&result));

            println!("Distribution of {}'s Sales Amount", session.salesperson());
            println!("{}\n", render::amount_distribution(&log));

            println!("Top {} Products by Win Rate", result.ranking.len());
            println!("{}", render::product_chart(&result.ranking));
        }
    }

    Ok(())
}
