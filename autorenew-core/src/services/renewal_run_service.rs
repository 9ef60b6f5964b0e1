//! Full reconciliation run
//!
//! Fetch registrar domains, then qualifying deals, reconcile them, hand the
//! toggle list to the browser automation delegate and, when enabled,
//! reactivate expired domains. Every phase is timed.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{
    reconcile, DealDirectoryService, DomainDirectoryService, ReactivationService, ServiceContext,
};
use crate::types::{
    ActionKind, PhaseTimings, ReactivateDomainRequest, RunOptions, RunSummary, ToggleOutcome,
};

pub struct RenewalRunService {
    ctx: Arc<ServiceContext>,
}

impl RenewalRunService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run the whole pipeline once.
    ///
    /// Only a failed probe request (or invalid options) ends the run early.
    /// Skipped pages, rejected deals and automation failures are reported in
    /// the summary.
    pub async fn run(&self, options: &RunOptions) -> CoreResult<RunSummary> {
        if options.reactivate && options.years_to_add == 0 {
            return Err(CoreError::ValidationError(
                "years_to_add must be at least 1 when reactivation is enabled".to_string(),
            ));
        }

        let started_at = Utc::now();
        let mut timings = PhaseTimings::default();

        let phase = Instant::now();
        let domains = DomainDirectoryService::new(self.ctx.clone(), options.directory.clone())
            .fetch_all_domains()
            .await?;
        timings.fetch_registrar_secs = phase.elapsed().as_secs_f64();
        log::info!(
            "Fetched {} registrar domains in {:.1}s",
            domains.items.len(),
            timings.fetch_registrar_secs
        );

        let phase = Instant::now();
        let qualified = DealDirectoryService::new(
            self.ctx.clone(),
            options.directory.clone(),
            options.rules,
        )
        .fetch_qualifying_deals()
        .await?;
        timings.fetch_deals_secs = phase.elapsed().as_secs_f64();

        let plan = reconcile(&qualified.deals.items, &domains.items, &options.reconcile);
        let toggle_list = plan.toggle_list();
        log::info!(
            "Plan: {} to toggle, {} to reactivate",
            toggle_list.len(),
            plan.reactivate_list().len()
        );

        let toggle = if options.dry_run || toggle_list.is_empty() {
            None
        } else {
            let phase = Instant::now();
            let outcome = match self.ctx.toggler.run_auto_renew_toggle(&toggle_list).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Browser automation failed: {e}");
                    ToggleOutcome::all_failed(&toggle_list, &e.to_string())
                }
            };
            timings.toggle_secs = phase.elapsed().as_secs_f64();
            Some(outcome)
        };

        // one registrar call per domain, whatever the duplicate policy
        let mut seen = HashSet::new();
        let reactivation_requests: Vec<ReactivateDomainRequest> = plan
            .actions_of(ActionKind::ReactivateExpired)
            .filter(|action| seen.insert(action.domain_name.clone()))
            .map(|action| ReactivateDomainRequest {
                domain_name: action.domain_name.clone(),
                years_to_add: options.years_to_add,
                is_premium: action.is_premium,
            })
            .collect();

        let reactivation =
            if options.dry_run || !options.reactivate || reactivation_requests.is_empty() {
                if !reactivation_requests.is_empty() && !options.dry_run {
                    log::info!(
                        "{} expired domains need reactivation; reactivation is not enabled",
                        reactivation_requests.len()
                    );
                }
                None
            } else {
                let phase = Instant::now();
                let report = ReactivationService::new(self.ctx.clone())
                    .reactivate_all(&reactivation_requests)
                    .await?;
                timings.reactivation_secs = phase.elapsed().as_secs_f64();
                Some(report)
            };

        let mut skipped_pages = domains.skipped_pages;
        skipped_pages.extend(qualified.deals.skipped_pages);
        if !skipped_pages.is_empty() {
            log::warn!(
                "{} pages were skipped; results may be incomplete",
                skipped_pages.len()
            );
        }

        Ok(RunSummary {
            started_at,
            dry_run: options.dry_run,
            domains_fetched: domains.items.len(),
            deals_qualified: qualified.deals.items.len(),
            rejections: qualified.rejections,
            skipped_pages,
            plan,
            toggle,
            reactivation,
            timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{
        domain, harness, qualifying_deal, MockDealProvider, MockRegistrar, RecordingToggler,
    };
    use crate::types::{DealEntry, DealStatus, DirectorySource, PageRangePolicy, RegistrarDomain};

    /// 150 domains: even ids have auto-renew off, every tenth is expired
    fn registrar_domains() -> Vec<RegistrarDomain> {
        (1..=150)
            .map(|i| domain(i, &format!("site{i}.com"), i % 2 == 1, i % 10 == 0))
            .collect()
    }

    fn deal_pages() -> Vec<Vec<DealEntry>> {
        vec![
            vec![
                qualifying_deal(1, "site2.com", DealStatus::Green),
                qualifying_deal(2, "site3.com", DealStatus::Green),
                qualifying_deal(3, "site120.com", DealStatus::Yellow),
                qualifying_deal(4, "site4.com", DealStatus::Red),
                qualifying_deal(5, "site130.com", DealStatus::Green),
            ],
            // Last page: never fetched with the default range policy
            vec![qualifying_deal(6, "site6.com", DealStatus::Green)],
        ]
    }

    #[tokio::test]
    async fn end_to_end_with_unfetched_last_deal_page() {
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );

        let summary = RenewalRunService::new(h.ctx.clone())
            .run(&RunOptions::default())
            .await
            .unwrap();

        assert_eq!(h.registrar.fetched_pages().await, vec![1, 2]);
        assert_eq!(h.deals.fetched_pages().await, vec![1]);
        assert_eq!(summary.domains_fetched, 150);
        assert_eq!(summary.deals_qualified, 4);
        assert_eq!(summary.rejections.red_status, 1);

        // site3 renews already; site6 sits on the unfetched page
        assert_eq!(summary.plan.toggle_list(), vec!["site2.com"]);
        assert_eq!(
            summary.plan.reactivate_list(),
            vec!["site120.com", "site130.com"]
        );

        let calls = h.toggler.calls.lock().await.clone();
        assert_eq!(calls, vec![vec!["site2.com".to_string()]]);

        // Reactivation is opt-in
        assert!(summary.reactivation.is_none());
        assert!(h.registrar.reactivations.lock().await.is_empty());
        assert!(!summary.is_degraded());
    }

    #[tokio::test]
    async fn inclusive_range_reaches_last_deal_page() {
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );
        let mut options = RunOptions::default();
        options.directory.deal_page_range = PageRangePolicy::Inclusive;

        let summary = RenewalRunService::new(h.ctx).run(&options).await.unwrap();

        assert_eq!(summary.plan.toggle_list(), vec!["site2.com", "site6.com"]);
    }

    #[tokio::test]
    async fn dry_run_invokes_nothing() {
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );
        let options = RunOptions {
            dry_run: true,
            reactivate: true,
            ..RunOptions::default()
        };

        let summary = RenewalRunService::new(h.ctx).run(&options).await.unwrap();

        assert!(!summary.plan.is_empty());
        assert!(summary.toggle.is_none());
        assert!(summary.reactivation.is_none());
        assert!(h.toggler.calls.lock().await.is_empty());
        assert!(h.registrar.reactivations.lock().await.is_empty());
    }

    #[tokio::test]
    async fn reactivation_when_enabled() {
        let mut domains = registrar_domains();
        domains[119].is_premium = true;
        let h = harness(
            MockRegistrar::new(domains),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );
        let options = RunOptions {
            reactivate: true,
            years_to_add: 2,
            ..RunOptions::default()
        };

        let summary = RenewalRunService::new(h.ctx).run(&options).await.unwrap();

        let report = summary.reactivation.unwrap();
        assert_eq!(report.succeeded.len(), 2);
        let sent = h.registrar.reactivations.lock().await.clone();
        assert_eq!(sent[0].domain_name, "site120.com");
        assert!(sent[0].is_premium);
        assert!(sent.iter().all(|r| r.years_to_add == 2));
    }

    #[tokio::test]
    async fn duplicate_deals_reactivate_an_expired_domain_once() {
        let h = harness(
            MockRegistrar::new(vec![domain(1, "lapsed.com", false, true)]),
            MockDealProvider::new(vec![
                vec![
                    qualifying_deal(1, "lapsed.com", DealStatus::Green),
                    qualifying_deal(2, "lapsed.com", DealStatus::Green),
                ],
                Vec::new(),
            ]),
            RecordingToggler::new(),
        );
        let options = RunOptions {
            reactivate: true,
            ..RunOptions::default()
        };

        let summary = RenewalRunService::new(h.ctx).run(&options).await.unwrap();

        // the plan keeps both deals; the registrar sees the domain once
        assert_eq!(
            summary.plan.reactivate_list(),
            vec!["lapsed.com", "lapsed.com"]
        );
        let sent = h.registrar.reactivations.lock().await.clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].domain_name, "lapsed.com");
        assert_eq!(summary.reactivation.unwrap().succeeded.len(), 1);
    }

    #[tokio::test]
    async fn zero_years_with_reactivation_fails_before_any_request() {
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );
        let options = RunOptions {
            reactivate: true,
            years_to_add: 0,
            ..RunOptions::default()
        };

        let result = RenewalRunService::new(h.ctx).run(&options).await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert!(h.registrar.requests.lock().await.is_empty());
        assert!(h.deals.requests.lock().await.is_empty());
        assert!(h.toggler.calls.lock().await.is_empty());
        assert!(h.registrar.reactivations.lock().await.is_empty());
    }

    #[tokio::test]
    async fn nothing_to_do_skips_the_delegate() {
        let h = harness(
            MockRegistrar::new(vec![domain(1, "fine.com", true, false)]),
            MockDealProvider::new(vec![
                vec![qualifying_deal(1, "fine.com", DealStatus::Green)],
                Vec::new(),
            ]),
            RecordingToggler::new(),
        );

        let summary = RenewalRunService::new(h.ctx)
            .run(&RunOptions::default())
            .await
            .unwrap();

        assert!(summary.plan.is_empty());
        assert!(summary.toggle.is_none());
        assert!(h.toggler.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn broken_delegate_does_not_abort_the_run() {
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::broken(),
        );

        let summary = RenewalRunService::new(h.ctx)
            .run(&RunOptions::default())
            .await
            .unwrap();

        let toggle = summary.toggle.unwrap();
        assert_eq!(toggle.attempted, 1);
        assert_eq!(toggle.succeeded(), 0);
        assert!(toggle.failures[0].reason.contains("browser could not be launched"));
    }

    #[tokio::test]
    async fn per_domain_toggle_failures_are_reported() {
        let mut options = RunOptions::default();
        options.directory.deal_page_range = PageRangePolicy::Inclusive;
        let h = harness(
            MockRegistrar::new(registrar_domains()),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new().with_failing_domain("site6.com"),
        );

        let summary = RenewalRunService::new(h.ctx).run(&options).await.unwrap();

        let toggle = summary.toggle.unwrap();
        assert_eq!(toggle.attempted, 2);
        assert_eq!(toggle.succeeded(), 1);
        assert_eq!(toggle.failures[0].domain, "site6.com");
    }

    #[tokio::test]
    async fn skipped_pages_from_both_sources_are_reported() {
        let h = harness(
            MockRegistrar::new(registrar_domains()).with_failing_page(2),
            MockDealProvider::new(deal_pages()).with_failing_page(1),
            RecordingToggler::new(),
        );

        let summary = RenewalRunService::new(h.ctx)
            .run(&RunOptions::default())
            .await
            .unwrap();

        assert!(summary.is_degraded());
        let sources: Vec<_> = summary.skipped_pages.iter().map(|p| p.source).collect();
        assert_eq!(sources, vec![DirectorySource::Registrar, DirectorySource::Deals]);
        assert_eq!(summary.domains_fetched, 100);
        assert!(summary.plan.is_empty());
    }

    #[tokio::test]
    async fn failed_probe_ends_the_run() {
        let h = harness(
            MockRegistrar::new(registrar_domains()).with_failing_probe(),
            MockDealProvider::new(deal_pages()),
            RecordingToggler::new(),
        );

        let result = RenewalRunService::new(h.ctx)
            .run(&RunOptions::default())
            .await;

        assert!(matches!(result, Err(CoreError::Provider(_))));
        assert!(h.deals.requests.lock().await.is_empty());
    }
}
