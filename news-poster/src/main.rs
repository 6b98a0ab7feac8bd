use anyhow::Context;
use clap::Parser;
use news_poster::{AppConfig, Credentials, Fetcher, PostingPipeline, RunOutcome, StateStore, XPublisher};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(name = "news-poster", about = "Post the newest relevant feed headline, once per run")]
struct Args {
    /// TOML file overriding the built-in feeds, keywords and limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file holding previously posted titles
    #[arg(long, default_value = "posted.json")]
    state_file: PathBuf,

    /// Select and compose, but do not post or update state
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Checked before any network traffic
    let publisher = if args.dry_run {
        None
    } else {
        let credentials = Credentials::from_env()?;
        Some(XPublisher::new(&config.endpoint, credentials)?)
    };

    let fetcher = Fetcher::new(config.fetch.clone()).context("Failed to build HTTP client")?;

    let store = StateStore::new(&args.state_file, config.history_limit);
    let mut lock = store
        .lock_file()
        .with_context(|| format!("Failed to open lock for {}", store.path().display()))?;
    let _guard = lock.acquire().context("Failed to lock state file")?;

    let pipeline = PostingPipeline::new(
        &config,
        &fetcher,
        publisher.as_ref().map(|p| p as &dyn news_poster::Publisher),
    );

    match pipeline.run(&store).await? {
        RunOutcome::Posted { title, source, response, .. } => {
            info!("Posted '{}' ({}): {}", title, source, response);
        }
        RunOutcome::DryRun { title, .. } => {
            info!("Dry run selected '{}'", title);
        }
        RunOutcome::NoCandidate => {
            info!("No new relevant news");
        }
    }

    Ok(())
}
