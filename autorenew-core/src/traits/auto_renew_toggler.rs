//! Browser automation delegate Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ToggleOutcome;

/// Flips auto-renew on for a list of domains through the registrar's web UI.
///
/// Implementations drive a single browser session, so domains are handled
/// one at a time in the order given. A failure for one domain is logged and
/// the next domain proceeds; `Err` is reserved for the case where the
/// delegate could not run at all.
#[async_trait]
pub trait AutoRenewToggler: Send + Sync {
    /// Toggle auto-renew for every domain in `domains`.
    async fn run_auto_renew_toggle(&self, domains: &[String]) -> CoreResult<ToggleOutcome>;
}
