// * Linkwise CLI
// * Loads a crawl snapshot, runs the analysis on a blocking thread and prints JSON.

use clap::{Parser, Subcommand, ValueEnum};
use linkwise::ops::telemetry;
use linkwise::{
    Analysis, AnalysisError, AnalysisReport, CrawlSnapshot, IngestError, Settings,
    SettingsError, SuggestionEngine,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "linkwise")]
#[command(about = "Internal-linking analysis for crawled websites")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a snapshot and write the full report
    Analyze {
        /// Crawl snapshot JSON (pages + links)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Settings JSON; defaults apply when omitted
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Report destination; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include the dense similarity matrix
        #[arg(long, default_value_t = false)]
        include_matrix: bool,
    },

    /// Contextual link suggestions for one page
    Suggest {
        #[arg(short, long)]
        snapshot: PathBuf,

        /// URL of the page to place links in
        #[arg(short, long)]
        url: String,

        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Site-level summary counts
    Stats {
        #[arg(short, long)]
        snapshot: PathBuf,

        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Page not found in snapshot: {0}")]
    UnknownPage(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.log_format {
        LogFormat::Json => telemetry::init_tracing(),
        LogFormat::Pretty => telemetry::init_tracing_pretty(),
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Analyze {
            snapshot,
            settings,
            output,
            include_matrix,
        } => {
            let analysis = load_and_analyze(&snapshot, settings.as_deref()).await?;
            let report = AnalysisReport::from_analysis(&analysis, include_matrix);
            let json = report.to_json_pretty()?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    tracing::info!(path = %path.display(), "Report written");
                }
                None => println!("{json}"),
            }
        }
        Command::Suggest {
            snapshot,
            url,
            settings,
        } => {
            let analysis = load_and_analyze(&snapshot, settings.as_deref()).await?;
            if analysis.page(&url).is_none() {
                return Err(CliError::UnknownPage(url));
            }
            let suggestions = SuggestionEngine::new(&analysis).get_contextual_link_suggestions(&url);
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        Command::Stats { snapshot, settings } => {
            let analysis = load_and_analyze(&snapshot, settings.as_deref()).await?;
            let stats = SuggestionEngine::new(&analysis).site_stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

async fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => {
            let contents = tokio::fs::read_to_string(path).await?;
            Ok(Settings::from_json(&contents)?)
        }
        None => Ok(Settings::default()),
    }
}

async fn load_and_analyze(snapshot: &Path, settings: Option<&Path>) -> Result<Analysis, CliError> {
    let settings = load_settings(settings).await?;
    let contents = tokio::fs::read_to_string(snapshot).await?;
    let snapshot = CrawlSnapshot::from_json(&contents)?.apply_limits(&settings.crawl);

    // * CPU-bound; keep it off the async workers
    let analysis = tokio::task::spawn_blocking(move || {
        Analysis::build(&snapshot, &settings.analysis)
    })
    .await??;

    Ok(analysis)
}
