//! Deal directory service

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::page_fetcher::fetch_pages;
use crate::services::ServiceContext;
use crate::types::{
    DealQueryParams, DealRecord, DirectoryOptions, DirectorySource, FetchOutcome,
    PageRangePolicy, QualificationRules, QualifiedDeals, RejectionTally,
};

/// Fetches CRM deals and keeps the ones that qualify for auto-renewal
pub struct DealDirectoryService {
    ctx: Arc<ServiceContext>,
    options: DirectoryOptions,
    rules: QualificationRules,
}

impl DealDirectoryService {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        options: DirectoryOptions,
        rules: QualificationRules,
    ) -> Self {
        Self {
            ctx,
            options,
            rules,
        }
    }

    /// Fetch every qualifying deal, in CRM order.
    ///
    /// A probe request without a page number reports the page count; the
    /// pages selected by [`DirectoryOptions::deal_page_range`] are then
    /// requested and filtered through [`DealRecord::qualify`].
    pub async fn fetch_qualifying_deals(&self) -> CoreResult<QualifiedDeals> {
        let deals = &self.ctx.deals;
        let probe = deals
            .list_deals(&DealQueryParams::default())
            .await
            .inspect_err(|e| log::error!("[{}] Deal page count probe failed: {e}", deals.id()))?;

        let total_pages = probe.total_pages;
        let policy = self.options.deal_page_range;
        log::info!("[{}] {total_pages} deal pages reported", deals.id());
        if policy == PageRangePolicy::ExcludeLast && total_pages > 0 {
            log::info!(
                "[{}] Page {total_pages} is outside the exclusive page range and is not fetched",
                deals.id()
            );
        }

        let batch = fetch_pages(
            DirectorySource::Deals,
            policy.pages(total_pages),
            total_pages,
            self.options.fetch_concurrency,
            |page| async move {
                deals
                    .list_deals(&DealQueryParams::page(page))
                    .await
                    .map(|r| r.items)
            },
        )
        .await;

        let mut rejections = RejectionTally::default();
        let mut qualifying = Vec::new();
        for entry in batch.items {
            let deal_id = entry.id;
            match DealRecord::qualify(entry, &self.rules) {
                Ok(record) => qualifying.push(record),
                Err(reason) => {
                    log::debug!("Deal {deal_id} excluded: {reason}");
                    rejections.record(reason);
                }
            }
        }

        log::info!(
            "Filtered deals: {} qualifying, {} excluded",
            qualifying.len(),
            rejections.total()
        );

        Ok(QualifiedDeals {
            deals: FetchOutcome {
                items: qualifying,
                total_pages,
                pages_requested: policy.requested(total_pages),
                skipped_pages: batch.skipped,
            },
            rejections,
        })
    }
}
