mod error;
mod fetch;
mod parser;
mod pipeline;
mod record;
mod table;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use error::ArgumentError;
use fetch::{BatchOptions, HttpFetcher};
use parser::extract::results::CellLayout;
use pipeline::RunConfig;

#[derive(Parser)]
#[command(
    name = "volby_scraper",
    about = "Election results of every municipality on a volby.cz summary page, as CSV"
)]
struct Cli {
    /// Summary page URL, e.g. https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101
    #[arg(value_parser = parse_summary_url)]
    url: Url,

    /// Output file (must end with .csv)
    #[arg(value_parser = parse_output_path)]
    output: PathBuf,

    /// Prefix joined with relative detail links (default: the summary URL up to its last '/')
    #[arg(long)]
    base_prefix: Option<String>,

    /// Per-request timeout in seconds; 0 disables it
    #[arg(long, env = "VOLBY_REQUEST_TIMEOUT", default_value = "30")]
    request_timeout: u64,

    /// Deadline in seconds for fetching all detail pages
    #[arg(long, env = "VOLBY_BATCH_TIMEOUT")]
    batch_timeout: Option<u64>,

    /// Max detail requests in flight (default: all at once)
    #[arg(long, env = "VOLBY_CONCURRENCY")]
    concurrency: Option<usize>,
}

fn parse_summary_url(raw: &str) -> Result<Url, ArgumentError> {
    let url = Url::parse(raw).map_err(|_| ArgumentError::NotUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ArgumentError::UnsupportedScheme(raw.to_string())),
    }
}

fn parse_output_path(raw: &str) -> Result<PathBuf, ArgumentError> {
    if raw.ends_with(".csv") && raw.len() > ".csv".len() {
        Ok(PathBuf::from(raw))
    } else {
        Err(ArgumentError::NotCsv(raw.to_string()))
    }
}

/// Summary URL without query or fragment, cut after its last '/'.
fn base_prefix(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    let base = base.as_str();
    match base.rfind('/') {
        Some(i) => base[..=i].to_string(),
        None => base.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let config = RunConfig {
        base_prefix: cli.base_prefix.unwrap_or_else(|| base_prefix(&cli.url)),
        summary_url: cli.url.to_string(),
        batch: BatchOptions {
            concurrency: cli.concurrency,
            timeout: cli.batch_timeout.map(Duration::from_secs),
        },
        layout: CellLayout::PS311,
    };
    let request_timeout =
        (cli.request_timeout > 0).then(|| Duration::from_secs(cli.request_timeout));
    let fetcher = HttpFetcher::new(request_timeout).context("Failed to build HTTP client")?;

    println!("Scraping {}", config.summary_url);
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let table = pipeline::run(&fetcher, &config, &pb)
        .await
        .context("Scraping failed, no file was written")?;
    table::write_table(&cli.output, &table)?;
    println!(
        "Wrote {} municipalities to {}",
        table.records.len(),
        cli.output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
