//! Expired domain reactivation service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ReactivateDomainRequest, ReactivationFailure, ReactivationReport};

/// Renews expired domains through the registrar API
pub struct ReactivationService {
    ctx: Arc<ServiceContext>,
}

impl ReactivationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Reactivate each domain in turn.
    ///
    /// Failures are collected per domain; the batch always runs to the end.
    pub async fn reactivate_all(
        &self,
        requests: &[ReactivateDomainRequest],
    ) -> CoreResult<ReactivationReport> {
        if let Some(bad) = requests.iter().find(|r| r.years_to_add == 0) {
            return Err(CoreError::ValidationError(format!(
                "years to add must be at least 1 (domain {})",
                bad.domain_name
            )));
        }

        let total = requests.len();
        let mut report = ReactivationReport::default();

        for (index, request) in requests.iter().enumerate() {
            log::info!(
                "Reactivating {} ({} of {total})",
                request.domain_name,
                index + 1
            );

            match self.ctx.registrar.reactivate_domain(request).await {
                Ok(result) if result.is_success => {
                    log::info!(
                        "Reactivated {} (order {:?}, charged {:?})",
                        result.domain_name,
                        result.order_id,
                        result.charged_amount
                    );
                    report.succeeded.push(result);
                }
                Ok(result) => {
                    log::warn!("Registrar declined to reactivate {}", request.domain_name);
                    report.failed.push(ReactivationFailure {
                        domain: request.domain_name.clone(),
                        error: format!("registrar reported no success for {}", result.domain_name),
                    });
                }
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Failed to reactivate {}: {e}", request.domain_name);
                    } else {
                        log::error!("Failed to reactivate {}: {e}", request.domain_name);
                    }
                    report.failed.push(ReactivationFailure {
                        domain: request.domain_name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
