//! Log-only browser delegate

use async_trait::async_trait;
use autorenew_core::error::CoreResult;
use autorenew_core::types::ToggleOutcome;
use autorenew_core::AutoRenewToggler;

/// Delegate used when no automation program is configured.
///
/// Nothing is toggled: the outcome is marked simulated so the summary lists
/// the domains as pending instead of counting them as renewed.
pub struct LogOnlyToggler;

impl LogOnlyToggler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for LogOnlyToggler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutoRenewToggler for LogOnlyToggler {
    async fn run_auto_renew_toggle(&self, domains: &[String]) -> CoreResult<ToggleOutcome> {
        log::warn!(
            "No toggle command configured, {} domain(s) left for manual auto-renew",
            domains.len()
        );
        for domain in domains {
            log::info!("Would enable auto-renew for {domain}");
        }

        Ok(ToggleOutcome::simulated(domains))
    }
}
