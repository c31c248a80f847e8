use std::path::PathBuf;

use clap::Parser;
use tracing::Level as TraceLevel;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use bday::config::Config;
use bday::driver::{Driver, Step};
use bday::error::{AppError, AppResult};

/// Replays navigation scripts against a birthday site directory.
#[derive(Parser, Debug)]
#[command(name = "bday", author, version, about)]
struct Cli {
    /// Config file. Defaults to BDAY_CONFIG_PATH or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Site directory holding the page documents.
    #[arg(long)]
    site: Option<PathBuf>,

    /// File backing the durable storage tier.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Steps, one per argument: "goto <page>", "click <href>", "back",
    /// "forward" or "key <name>".
    steps: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = resolve_config(&cli)?;
    let steps = parse_steps(&cli.steps)?;

    let driver = Driver::open(&config).await?;
    let outcomes = driver.run(&steps).await;
    info!(
        steps = outcomes.len(),
        page = %driver.router().current_page(),
        "Script finished"
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(site) = &cli.site {
        config.site.root = site.clone();
    }
    if let Some(state) = &cli.state {
        config.storage.durable_path = Some(state.clone());
    }
    Ok(config)
}

fn parse_steps(raw: &[String]) -> AppResult<Vec<Step>> {
    raw.iter()
        .map(|step| step.parse::<Step>())
        .collect::<Result<Vec<_>, AppError>>()
}
