//! Auto-renew reconciliation core
//!
//! Cross-references the registrar's domains with the CRM's deals and works
//! out which domains must have auto-renew switched on and which have already
//! expired:
//! - Registrar directory (`DomainDirectoryService`)
//! - Deal directory and qualification filter (`DealDirectoryService`)
//! - Reconciliation engine (`reconcile`)
//! - Reactivation of expired domains (`ReactivationService`)
//! - The full run (`RenewalRunService`)
//!
//! Remote services are reached only through the `autorenew-provider` traits
//! and the browser automation delegate through [`AutoRenewToggler`], so every
//! collaborator can be replaced in tests.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::AutoRenewToggler;
