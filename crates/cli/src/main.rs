mod config;
mod error;

use std::path::PathBuf;

use clap::Parser;
use runtime::{McpToolHost, RunReport, Session};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "toolloop.toml";

#[derive(Parser)]
#[command(name = "toolloop")]
#[command(about = "Drive a language model through MCP tools, one call per iteration", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Override the seed query
    #[arg(short, long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolloop=info,runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        if !e.already_logged() {
            error!(error = %runtime::report(&e), "toolloop failed");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    let backend = config.build_backend(|var| std::env::var(var).ok())?;
    let mut session_config = config.session_config()?;
    if let Some(query) = cli.query {
        session_config.query = query;
    }
    info!(%backend, max_iterations = session_config.max_iterations, "loaded configuration");

    let command = config.server.command.clone();
    info!(%command, args = ?config.server.args, "connecting to MCP server");
    let host = McpToolHost::spawn(&command, &config.server.args)
        .await
        .map_err(|source| Error::Mcp {
            command: command.clone(),
            source,
        })?;

    let mut session = Session::new(backend, host).with_config(session_config);
    let report = session.run().await;
    print_report(&report);

    let (_, host) = session.into_parts();
    host.shutdown()
        .await
        .map_err(|source| Error::Mcp { command, source })?;

    match report.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_report(report: &RunReport) {
    println!("\n=== {} iteration(s) ===", report.iterations);
    for entry in &report.transcript {
        println!("{entry}");
    }
    if let Some(last) = &report.last_result {
        println!("\nLast result: {last}");
    }
}
