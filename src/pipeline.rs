use indicatif::ProgressBar;
use tracing::info;

use crate::error::ScrapeError;
use crate::fetch::{self, BatchOptions, Fetcher};
use crate::parser::{self, extract::results::CellLayout};
use crate::record::{self, OutputTable};

pub struct RunConfig {
    pub summary_url: String,
    /// Prepended to every relative detail link.
    pub base_prefix: String,
    pub batch: BatchOptions,
    pub layout: CellLayout,
}

/// Summary page → detail links → detail pages → assembled table.
///
/// Nothing is returned unless every page was fetched and parsed.
pub async fn run<F: Fetcher>(
    fetcher: &F,
    config: &RunConfig,
    progress: &ProgressBar,
) -> Result<OutputTable, ScrapeError> {
    info!("Fetching summary page: {}", config.summary_url);
    let summary = fetcher.fetch(&config.summary_url).await?;
    let municipalities = parser::discover_municipalities(&summary, &config.base_prefix)?;

    let urls: Vec<String> = municipalities.iter().map(|m| m.url.clone()).collect();
    progress.set_length(urls.len() as u64);
    let bodies = fetch::fetch_all(fetcher, &urls, config.batch, progress).await;
    progress.finish_and_clear();
    let bodies = bodies?;

    let pages = parser::parse_detail_pages(&urls, &bodies, config.layout)?;
    let table = record::assemble(municipalities, pages)?;
    info!(
        "Assembled {} municipalities across {} parties",
        table.records.len(),
        table.parties.len()
    );
    Ok(table)
}
