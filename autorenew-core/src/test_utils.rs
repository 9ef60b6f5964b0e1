//! Test helpers
//!
//! In-memory provider mocks with scriptable failures, a recording toggler,
//! and record builders.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use autorenew_provider::{DealProvider, ProviderError, RegistrarProvider};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::AutoRenewToggler;
use crate::types::{
    DealCompany, DealEntry, DealQueryParams, DealStatus, PaginatedResponse, PaginationParams,
    ReactivateDomainRequest, ReactivateDomainResult, RegistrarDomain, ToggleFailure,
    ToggleOutcome, PURCHASED_BY_US_CODE,
};

fn network_error(provider: &str, detail: String) -> ProviderError {
    ProviderError::NetworkError {
        provider: provider.to_string(),
        detail,
    }
}

// ===== Builders =====

pub fn domain(id: u64, name: &str, auto_renew: bool, expired: bool) -> RegistrarDomain {
    RegistrarDomain {
        id,
        name: name.to_string(),
        user: "acme".to_string(),
        created_at: None,
        expires_at: None,
        is_expired: expired,
        is_locked: false,
        auto_renew_enabled: auto_renew,
        whois_guard: "ENABLED".to_string(),
        is_premium: false,
        is_our_dns: true,
    }
}

/// A deal that satisfies every qualification rule
pub fn qualifying_deal(id: u64, domain: &str, status: DealStatus) -> DealEntry {
    DealEntry {
        id,
        name: Some(format!("Deal {id}")),
        status,
        company: Some(DealCompany {
            id: Some(id * 10),
            name: Some(format!("Company {id}")),
        }),
        domain_name: Some(domain.to_string()),
        purchase_channel_code: Some(PURCHASED_BY_US_CODE),
        purchase_confirmed_date: Some("2019-03-01".to_string()),
    }
}

// ===== MockRegistrar =====

pub struct MockRegistrar {
    domains: Vec<RegistrarDomain>,
    fail_probe: bool,
    failing_pages: HashSet<u32>,
    failing_reactivations: HashSet<String>,
    /// Every `list_domains` call, as `(page, page_size)`
    pub requests: Mutex<Vec<(u32, u32)>>,
    /// Every reactivation request, in call order
    pub reactivations: Mutex<Vec<ReactivateDomainRequest>>,
}

impl MockRegistrar {
    pub fn new(domains: Vec<RegistrarDomain>) -> Self {
        Self {
            domains,
            fail_probe: false,
            failing_pages: HashSet::new(),
            failing_reactivations: HashSet::new(),
            requests: Mutex::new(Vec::new()),
            reactivations: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request for `page` after the probe.
    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Fail the probe request.
    pub fn with_failing_probe(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    pub fn with_failing_reactivation(mut self, domain: &str) -> Self {
        self.failing_reactivations.insert(domain.to_string());
        self
    }

    /// Page numbers requested after the probe, in call order
    pub async fn fetched_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .await
            .iter()
            .skip(1)
            .map(|(page, _)| *page)
            .collect()
    }
}

#[async_trait]
impl RegistrarProvider for MockRegistrar {
    fn id(&self) -> &'static str {
        "mock-registrar"
    }

    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> autorenew_provider::Result<PaginatedResponse<RegistrarDomain>> {
        let is_probe = {
            let mut requests = self.requests.lock().await;
            requests.push((params.page, params.page_size));
            requests.len() == 1
        };

        if is_probe && self.fail_probe {
            return Err(network_error(self.id(), "probe refused".to_string()));
        }
        if !is_probe && self.failing_pages.contains(&params.page) {
            return Err(network_error(
                self.id(),
                format!("page {} reset", params.page),
            ));
        }

        let size = params.page_size.max(1) as usize;
        let start = (params.page.max(1) as usize - 1) * size;
        let items = self.domains.iter().skip(start).take(size).cloned().collect();
        let total = u32::try_from(self.domains.len()).unwrap_or(u32::MAX);

        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total,
        ))
    }

    async fn reactivate_domain(
        &self,
        req: &ReactivateDomainRequest,
    ) -> autorenew_provider::Result<ReactivateDomainResult> {
        self.reactivations.lock().await.push(req.clone());

        if self.failing_reactivations.contains(&req.domain_name) {
            return Err(ProviderError::DomainNotFound {
                provider: self.id().to_string(),
                domain: req.domain_name.clone(),
                raw_message: Some("Domain not found".to_string()),
            });
        }

        Ok(ReactivateDomainResult {
            domain_name: req.domain_name.clone(),
            is_success: true,
            charged_amount: Some(10.87),
            order_id: Some(1),
            transaction_id: Some(2),
        })
    }
}

// ===== MockDealProvider =====

pub struct MockDealProvider {
    pages: Vec<Vec<DealEntry>>,
    failing_pages: HashSet<u32>,
    /// Every `list_deals` call's `page`, `None` for the probe
    pub requests: Mutex<Vec<Option<u32>>>,
}

impl MockDealProvider {
    /// One inner `Vec` per CRM page; the reported page count is `pages.len()`.
    pub fn new(pages: Vec<Vec<DealEntry>>) -> Self {
        Self {
            pages,
            failing_pages: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Explicit page numbers requested, in call order
    pub async fn fetched_pages(&self) -> Vec<u32> {
        self.requests.lock().await.iter().flatten().copied().collect()
    }
}

#[async_trait]
impl DealProvider for MockDealProvider {
    fn id(&self) -> &'static str {
        "mock-deals"
    }

    async fn list_deals(
        &self,
        params: &DealQueryParams,
    ) -> autorenew_provider::Result<PaginatedResponse<DealEntry>> {
        self.requests.lock().await.push(params.page);

        let page = params.page.unwrap_or(1);
        if params.page.is_some() && self.failing_pages.contains(&page) {
            return Err(network_error(self.id(), format!("page {page} reset")));
        }

        let items = (page as usize)
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .unwrap_or_default();
        let total_pages = u32::try_from(self.pages.len()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.pages.iter().map(Vec::len).sum::<usize>()).unwrap_or(0);
        let per_page = u32::try_from(self.pages.first().map_or(0, Vec::len)).unwrap_or(0);

        Ok(PaginatedResponse::with_total_pages(
            items,
            page,
            per_page,
            total,
            total_pages,
        ))
    }
}

// ===== RecordingToggler =====

pub struct RecordingToggler {
    /// Every invocation's domain list
    pub calls: Mutex<Vec<Vec<String>>>,
    failing_domains: HashSet<String>,
    broken: bool,
}

impl RecordingToggler {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing_domains: HashSet::new(),
            broken: false,
        }
    }

    /// Report `domain` as a per-domain failure.
    pub fn with_failing_domain(mut self, domain: &str) -> Self {
        self.failing_domains.insert(domain.to_string());
        self
    }

    /// Fail the whole invocation.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl AutoRenewToggler for RecordingToggler {
    async fn run_auto_renew_toggle(&self, domains: &[String]) -> CoreResult<ToggleOutcome> {
        self.calls.lock().await.push(domains.to_vec());

        if self.broken {
            return Err(CoreError::AutomationFailure(
                "browser could not be launched".to_string(),
            ));
        }

        Ok(ToggleOutcome {
            attempted: domains.len(),
            failures: domains
                .iter()
                .filter(|d| self.failing_domains.contains(*d))
                .map(|d| ToggleFailure {
                    domain: d.clone(),
                    reason: "toggle button not found".to_string(),
                })
                .collect(),
            simulated: false,
        })
    }
}

// ===== Context =====

pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub registrar: Arc<MockRegistrar>,
    pub deals: Arc<MockDealProvider>,
    pub toggler: Arc<RecordingToggler>,
}

pub fn harness(
    registrar: MockRegistrar,
    deals: MockDealProvider,
    toggler: RecordingToggler,
) -> TestHarness {
    let registrar = Arc::new(registrar);
    let deals = Arc::new(deals);
    let toggler = Arc::new(toggler);
    let ctx = Arc::new(ServiceContext::new(
        registrar.clone(),
        deals.clone(),
        toggler.clone(),
    ));
    TestHarness {
        ctx,
        registrar,
        deals,
        toggler,
    }
}
