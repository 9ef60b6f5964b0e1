//! Shared page-fetch loop for the directory services

use std::future::Future;

use futures::stream::{self, StreamExt};

use crate::error::ProviderError;
use crate::types::{DirectorySource, SkippedPage};

/// Items of the pages that succeeded, and the pages that did not
pub(crate) struct PageBatch<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedPage>,
}

/// Fetch `pages` with at most `concurrency` requests in flight.
///
/// Results are consumed in page order whatever the completion order. A failed
/// page is logged and recorded; it never stops the loop.
pub(crate) async fn fetch_pages<T, F, Fut>(
    source: DirectorySource,
    pages: Vec<u32>,
    total_pages: u32,
    concurrency: usize,
    fetch: F,
) -> PageBatch<T>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ProviderError>>,
{
    let mut results = std::pin::pin!(stream::iter(pages)
        .map(|page| {
            let request = fetch(page);
            async move { (page, request.await) }
        })
        .buffered(concurrency.max(1)));

    let mut batch = PageBatch {
        items: Vec::new(),
        skipped: Vec::new(),
    };

    while let Some((page, result)) = results.next().await {
        match result {
            Ok(items) => {
                log::info!(
                    "[{source}] Fetched page {page} of {total_pages} ({} items)",
                    items.len()
                );
                batch.items.extend(items);
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[{source}] Skipping page {page} of {total_pages}: {e}");
                } else {
                    log::error!("[{source}] Skipping page {page} of {total_pages}: {e}");
                }
                batch.skipped.push(SkippedPage {
                    source,
                    page,
                    reason: e.to_string(),
                });
            }
        }
    }

    batch
}
