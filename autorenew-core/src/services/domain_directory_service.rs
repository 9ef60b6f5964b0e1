//! Registrar directory service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::page_fetcher::fetch_pages;
use crate::services::ServiceContext;
use crate::types::{
    page_count, DirectoryOptions, DirectorySource, FetchOutcome, PaginationParams,
    RegistrarDomain,
};

/// Fetches every domain of the registrar account
pub struct DomainDirectoryService {
    ctx: Arc<ServiceContext>,
    options: DirectoryOptions,
}

impl DomainDirectoryService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, options: DirectoryOptions) -> Self {
        Self { ctx, options }
    }

    /// Fetch all domains, page by page, in registrar order.
    ///
    /// A probe request for page 1 reports the item total; pages
    /// `1..=ceil(total / page_size)` are then requested. The probe failing is
    /// fatal. A later page failing only drops that page's domains and is
    /// recorded in [`FetchOutcome::skipped_pages`].
    pub async fn fetch_all_domains(&self) -> CoreResult<FetchOutcome<RegistrarDomain>> {
        let requested_size = self.options.registrar_page_size;
        if requested_size == 0 {
            return Err(CoreError::ValidationError(
                "registrar page size must be positive".to_string(),
            ));
        }

        let registrar = &self.ctx.registrar;
        let probe = registrar
            .list_domains(&PaginationParams {
                page: 1,
                page_size: requested_size,
            })
            .await
            .inspect_err(|e| log::error!("[{}] Domain count probe failed: {e}", registrar.id()))?;

        // The registrar may clamp the page size; page with the size it reports
        let page_size = if probe.page_size == 0 {
            requested_size
        } else {
            probe.page_size
        };
        let total_pages = page_count(probe.total_count, page_size);
        log::info!(
            "[{}] {} domains over {total_pages} pages of {page_size}",
            registrar.id(),
            probe.total_count
        );

        let batch = fetch_pages(
            DirectorySource::Registrar,
            (1..=total_pages).collect(),
            total_pages,
            self.options.fetch_concurrency,
            |page| {
                let params = PaginationParams { page, page_size };
                async move { registrar.list_domains(&params).await.map(|r| r.items) }
            },
        )
        .await;

        Ok(FetchOutcome {
            items: batch.items,
            total_pages,
            pages_requested: total_pages,
            skipped_pages: batch.skipped,
        })
    }
}
