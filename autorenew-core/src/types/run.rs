//! Run options, delegate outcomes and the run summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    DirectoryOptions, QualificationRules, ReactivateDomainResult, ReconcileOptions,
    ReconciliationPlan, RejectionTally, SkippedPage,
};

/// Options for a full reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Compute the plan without invoking any side effect.
    pub dry_run: bool,
    /// Reactivate expired domains through the registrar API.
    pub reactivate: bool,
    /// Renewal period for reactivations.
    pub years_to_add: u32,
    pub directory: DirectoryOptions,
    pub rules: QualificationRules,
    pub reconcile: ReconcileOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            reactivate: false,
            years_to_add: 1,
            directory: DirectoryOptions::default(),
            rules: QualificationRules::default(),
            reconcile: ReconcileOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFailure {
    pub domain: String,
    pub reason: String,
}

/// What the browser automation delegate reports back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    /// Domains the delegate tried to toggle.
    pub attempted: usize,
    /// Domains the delegate knows failed. Delegates without per-domain
    /// reporting leave this empty.
    pub failures: Vec<ToggleFailure>,
    /// The delegate only reported what it would do; no auto-renew flag changed.
    #[serde(default)]
    pub simulated: bool,
}

impl ToggleOutcome {
    /// Every domain counted as failed for the same reason.
    #[must_use]
    pub fn all_failed(domains: &[String], reason: &str) -> Self {
        Self {
            attempted: domains.len(),
            failures: domains
                .iter()
                .map(|domain| ToggleFailure {
                    domain: domain.clone(),
                    reason: reason.to_string(),
                })
                .collect(),
            simulated: false,
        }
    }

    /// Domains left for the operator: reported, not toggled.
    #[must_use]
    pub fn simulated(domains: &[String]) -> Self {
        Self {
            attempted: domains.len(),
            failures: Vec::new(),
            simulated: true,
        }
    }

    /// Domains whose auto-renew flag actually changed. Always 0 when simulated.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        if self.simulated {
            return 0;
        }
        self.attempted.saturating_sub(self.failures.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivationFailure {
    pub domain: String,
    pub error: String,
}

/// Per-domain results of a reactivation batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivationReport {
    pub succeeded: Vec<ReactivateDomainResult>,
    pub failed: Vec<ReactivationFailure>,
}

/// Wall-clock time per run phase, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTimings {
    pub fetch_registrar_secs: f64,
    pub fetch_deals_secs: f64,
    pub toggle_secs: f64,
    pub reactivation_secs: f64,
}

impl PhaseTimings {
    #[must_use]
    pub fn total_secs(&self) -> f64 {
        self.fetch_registrar_secs + self.fetch_deals_secs + self.toggle_secs + self.reactivation_secs
    }
}

/// Everything a run did, including what it could not see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    pub domains_fetched: usize,
    pub deals_qualified: usize,
    pub rejections: RejectionTally,
    /// Registrar and deal pages that were lost.
    pub skipped_pages: Vec<SkippedPage>,
    pub plan: ReconciliationPlan,
    /// `None` when the delegate was not invoked.
    pub toggle: Option<ToggleOutcome>,
    /// `None` when reactivation was not enabled or had nothing to do.
    pub reactivation: Option<ReactivationReport>,
    pub timings: PhaseTimings,
}

impl RunSummary {
    /// Whether data was lost while fetching.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.skipped_pages.is_empty()
    }
}

/// `"Auto renewed 3 domains in 12.4 seconds"`
#[must_use]
pub fn auto_renew_message(count: usize, secs: f64) -> String {
    let noun = if count == 1 { "domain" } else { "domains" };
    format!("Auto renewed {count} {noun} in {secs:.1} seconds")
}
