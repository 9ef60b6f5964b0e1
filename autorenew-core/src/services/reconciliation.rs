//! Reconciliation engine
//!
//! Pure computation over already fetched data: no I/O, no hidden state.

use std::collections::{HashMap, HashSet};

use crate::types::{
    ActionKind, DealRecord, DuplicatePolicy, ReconcileOptions, ReconciliationAction,
    ReconciliationPlan, RegistrarDomain,
};

/// Whether a registrar domain needs any action at all.
///
/// Domains already renewing automatically and not expired are left alone.
#[must_use]
pub fn needs_action(domain: &RegistrarDomain) -> bool {
    !domain.auto_renew_enabled || domain.is_expired
}

/// Match qualifying deals against registrar domains.
///
/// Each deal is matched to the first domain whose name equals its domain
/// name exactly and that [needs action](needs_action). Expired matches are
/// reactivation candidates, the rest are toggle candidates. Actions follow
/// deal order.
#[must_use]
pub fn reconcile(
    deals: &[DealRecord],
    domains: &[RegistrarDomain],
    options: &ReconcileOptions,
) -> ReconciliationPlan {
    let mut candidates: HashMap<&str, &RegistrarDomain> = HashMap::new();
    for domain in domains.iter().filter(|d| needs_action(d)) {
        candidates.entry(domain.name.as_str()).or_insert(domain);
    }

    let mut matched: HashSet<&str> = HashSet::new();
    let mut actions = Vec::new();

    for deal in deals {
        let Some(domain) = candidates.get(deal.domain_name.as_str()) else {
            continue;
        };

        if !matched.insert(domain.name.as_str()) && options.duplicates == DuplicatePolicy::Dedupe {
            log::debug!(
                "Deal {} references {} again, skipped",
                deal.deal_id,
                domain.name
            );
            continue;
        }

        let action_kind = if domain.is_expired {
            ActionKind::ReactivateExpired
        } else {
            ActionKind::ToggleAutoRenew
        };

        actions.push(ReconciliationAction {
            deal_id: deal.deal_id,
            domain_name: domain.name.clone(),
            company_name: deal.company_name.clone(),
            deal_status: deal.status,
            current_auto_renew: domain.auto_renew_enabled,
            currently_expired: domain.is_expired,
            is_premium: domain.is_premium,
            action_kind,
        });
    }

    ReconciliationPlan { actions }
}
