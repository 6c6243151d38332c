use std::future::Future;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::error::TransportError;

/// GET-only page source.
pub trait Fetcher: Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// reqwest-backed fetcher; every request goes through one client and its connection pool.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let request_failed = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(request_failed)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Max requests in flight; `None` sends the whole batch at once.
    pub concurrency: Option<usize>,
    /// Deadline for the whole batch.
    pub timeout: Option<Duration>,
}

/// Fetch every URL concurrently. `result[i]` is the body of `urls[i]`.
///
/// The first failure aborts the batch; there are no partial results.
pub async fn fetch_all<F: Fetcher>(
    fetcher: &F,
    urls: &[String],
    options: BatchOptions,
    progress: &ProgressBar,
) -> Result<Vec<String>, TransportError> {
    let limit = options.concurrency.unwrap_or(urls.len()).max(1);
    info!("Fetching {} detail pages ({} at a time)", urls.len(), limit);

    let batch = stream::iter(urls)
        .map(|url| async move {
            let body = fetcher.fetch(url).await?;
            debug!("Fetched {} ({} bytes)", url, body.len());
            progress.inc(1);
            Ok::<_, TransportError>(body)
        })
        .buffered(limit)
        .try_collect::<Vec<_>>();

    match options.timeout {
        Some(deadline) => tokio::time::timeout(deadline, batch)
            .await
            .map_err(|_| TransportError::BatchTimeout(deadline))?,
        None => batch.await,
    }
}
