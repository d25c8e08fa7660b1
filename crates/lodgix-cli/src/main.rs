mod batch;
mod output;

use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser};
use lodgix_scraper::{PageClient, Platform, DEFAULT_USER_AGENT};
use tracing_subscriber::EnvFilter;

/// Number of results echoed to stdout after a run.
const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "lodgix-cli")]
#[command(about = "Extract property addresses and coordinates from vacation-rental pages")]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["url", "list"])))]
struct Cli {
    /// Single start URL to scrape
    #[arg(short, long, env = "LODGIX_URL")]
    url: Option<String>,

    /// Text file with one URL per line to process
    #[arg(short, long, env = "LODGIX_LIST")]
    list: Option<PathBuf>,

    /// Output directory for results
    #[arg(short, long, env = "LODGIX_OUTDIR", default_value = "out")]
    outdir: PathBuf,

    /// Analysis CSV path (default <outdir>/analysis.csv)
    #[arg(long, env = "LODGIX_CSV")]
    csv: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "LODGIX_TIMEOUT_SECS", default_value_t = 20)]
    timeout: u64,

    #[arg(long, env = "LODGIX_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Platform name used to recognise data endpoints and state globals
    #[arg(long, env = "LODGIX_PLATFORM", default_value = "lodgix")]
    platform: String,

    /// Write per-site JSON into <outdir>/json (always on)
    #[arg(long)]
    json: bool,

    #[arg(long, env = "LODGIX_LOG", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn csv_path(&self) -> PathBuf {
        self.csv
            .clone()
            .unwrap_or_else(|| self.outdir.join("analysis.csv"))
    }

    fn platform(&self) -> Platform {
        if self.platform.eq_ignore_ascii_case(Platform::LODGIX.name()) {
            Platform::LODGIX
        } else {
            Platform::new(self.platform.to_lowercase())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let urls = batch::collect_urls(cli.url.as_deref(), cli.list.as_deref())?;
    if urls.is_empty() {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "No URLs provided. Use --url or --list",
            )
            .exit();
    }

    tracing::debug!(json = cli.json, outdir = %cli.outdir.display(), "writing per-site JSON");
    let client = PageClient::new(cli.timeout, &cli.user_agent)?;
    let platform = cli.platform();

    let results = batch::run_batch(&client, &urls, &platform, &cli.outdir.join("json")).await?;

    let csv_path = cli.csv_path();
    output::write_csv_log(&results, &csv_path)?;

    println!(
        "Processed {} sites. CSV log: {}",
        results.len(),
        csv_path.display()
    );
    println!("Sample results:");
    for result in results.iter().take(SAMPLE_SIZE) {
        println!("{}", serde_json::to_string(result)?);
    }

    Ok(())
}
