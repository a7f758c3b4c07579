//! kube-rightsize CLI
//!
//! Scans a cluster for containers without resource requests/limits, suggests
//! values from live metrics and can patch the owning controller in place.

mod client;
mod config;
mod output;
mod prompt;
mod report;

use anyhow::Result;
use clap::Parser;
use rightsize_lib::{KubeCluster, ScanError, Scanner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Analyze and update Kubernetes resource requests and limits
#[derive(Parser)]
#[command(name = "kube-rightsize")]
#[command(
    author,
    version,
    about = "Analyze and update Kubernetes resource requests and limits",
    long_about = None
)]
pub struct Cli {
    /// Enable in-place update of the owning controller
    #[arg(long)]
    pub inplace_update: bool,

    /// Percentage buffer added to usage to calculate limits [default: 20]
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=100))]
    pub buffer_percent: Option<i64>,

    /// Namespace to scan (all namespaces if not specified)
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// Path to kubeconfig file (uses the default chain if not specified)
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = config::Config::load()?;
    init_tracing(cli.verbose, file_config.log_json);

    let options = file_config.merge(config::Overrides {
        buffer_percent: cli.buffer_percent,
        namespace: cli.namespace,
        format: cli.format,
        inplace_update: cli.inplace_update,
    })?;
    info!(
        namespace = ?options.scan.namespace,
        buffer_percent = options.scan.buffer_percent,
        inplace_update = options.scan.inplace_update,
        "Configuration resolved"
    );

    let client = client::init_kube_client(cli.kubeconfig.as_deref()).await?;
    let scanner = Scanner::new(KubeCluster::new(client), options.scan)?;

    let mut reporter = report::TerminalReporter::new(options.format);
    let mut confirmer = prompt::TerminalConfirmer;

    let summary = scanner.run(&mut reporter, &mut confirmer).await?;
    reporter.summary(&summary);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            let interrupted = e
                .downcast_ref::<ScanError>()
                .is_some_and(ScanError::is_interrupted);
            if interrupted {
                // Same status a shell reports for SIGINT
                ExitCode::from(130)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
