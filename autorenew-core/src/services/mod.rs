//! Business logic service layer

mod deal_directory_service;
mod domain_directory_service;
mod page_fetcher;
mod reactivation_service;
mod reconciliation;
mod renewal_run_service;

pub use deal_directory_service::DealDirectoryService;
pub use domain_directory_service::DomainDirectoryService;
pub use reactivation_service::ReactivationService;
pub use reconciliation::{needs_action, reconcile};
pub use renewal_run_service::RenewalRunService;

use std::sync::Arc;

use autorenew_provider::{DealProvider, RegistrarProvider};

use crate::traits::AutoRenewToggler;

/// Service context - holds all collaborators
///
/// The binary builds this from its configuration and injects the concrete
/// clients and the browser automation delegate.
pub struct ServiceContext {
    /// Registrar client
    pub registrar: Arc<dyn RegistrarProvider>,
    /// CRM client
    pub deals: Arc<dyn DealProvider>,
    /// Browser automation delegate
    pub toggler: Arc<dyn AutoRenewToggler>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        registrar: Arc<dyn RegistrarProvider>,
        deals: Arc<dyn DealProvider>,
        toggler: Arc<dyn AutoRenewToggler>,
    ) -> Self {
        Self {
            registrar,
            deals,
            toggler,
        }
    }
}
