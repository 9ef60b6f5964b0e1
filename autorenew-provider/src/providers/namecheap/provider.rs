//! Namecheap `RegistrarProvider` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, RegistrarProvider};
use crate::types::{
    PaginatedResponse, PaginationParams, ReactivateDomainRequest, ReactivateDomainResult,
    RegistrarDomain,
};

use super::{
    DomainGetListResponse, DomainReactivateResponse, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
    NamecheapDomain, NamecheapProvider,
};

impl NamecheapProvider {
    pub(crate) fn nc_domain_to_domain(domain: NamecheapDomain) -> RegistrarDomain {
        RegistrarDomain {
            id: domain.id,
            name: domain.name,
            user: domain.user,
            created_at: domain.created,
            expires_at: domain.expires,
            is_expired: domain.is_expired,
            is_locked: domain.is_locked,
            auto_renew_enabled: domain.auto_renew,
            whois_guard: domain.whois_guard,
            is_premium: domain.is_premium,
            is_our_dns: domain.is_our_dns,
        }
    }

    pub(crate) fn list_response_to_page(
        response: DomainGetListResponse,
    ) -> PaginatedResponse<RegistrarDomain> {
        let items = response
            .result
            .map(|r| r.domains)
            .unwrap_or_default()
            .into_iter()
            .map(Self::nc_domain_to_domain)
            .collect();

        PaginatedResponse::new(
            items,
            response.paging.current_page,
            response.paging.page_size,
            response.paging.total_items,
        )
    }
}

#[async_trait]
impl RegistrarProvider for NamecheapProvider {
    fn id(&self) -> &'static str {
        "namecheap"
    }

    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<RegistrarDomain>> {
        let params = params.validated(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let response: DomainGetListResponse = self
            .execute(
                "namecheap.domains.getList",
                &[
                    ("PageSize", params.page_size.to_string()),
                    ("Page", params.page.to_string()),
                ],
                ErrorContext::default(),
            )
            .await?;

        Ok(Self::list_response_to_page(response))
    }

    async fn reactivate_domain(
        &self,
        req: &ReactivateDomainRequest,
    ) -> Result<ReactivateDomainResult> {
        let response: DomainReactivateResponse = self
            .execute(
                "namecheap.domains.reactivate",
                &[
                    ("DomainName", req.domain_name.clone()),
                    ("YearsToAdd", req.years_to_add.to_string()),
                    ("IsPremiumDomain", req.is_premium.to_string()),
                ],
                ErrorContext::for_domain(&req.domain_name),
            )
            .await?;

        let result = response.result;
        Ok(ReactivateDomainResult {
            domain_name: result.domain,
            is_success: result.is_success,
            charged_amount: result.charged_amount,
            order_id: result.order_id,
            transaction_id: result.transaction_id,
        })
    }
}
