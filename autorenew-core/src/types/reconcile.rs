//! Reconciliation actions and plan

use serde::{Deserialize, Serialize};

use super::DealStatus;

/// What has to happen to a matched domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Flip auto-renew on through the browser automation delegate.
    ToggleAutoRenew,
    /// Renew an expired registration through the registrar API.
    ReactivateExpired,
}

/// How deals referencing an already matched domain are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Every matching deal yields an action, so a name can repeat.
    #[default]
    Allow,
    /// Only the first deal per domain yields an action.
    Dedupe,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOptions {
    pub duplicates: DuplicatePolicy,
}

/// One matched deal / domain pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationAction {
    pub deal_id: u64,
    pub domain_name: String,
    pub company_name: Option<String>,
    pub deal_status: DealStatus,
    pub current_auto_renew: bool,
    pub currently_expired: bool,
    /// Premium names are priced differently on reactivation.
    pub is_premium: bool,
    pub action_kind: ActionKind,
}

/// Matched actions in deal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationPlan {
    pub actions: Vec<ReconciliationAction>,
}

impl ReconciliationPlan {
    fn names_of(&self, kind: ActionKind) -> Vec<String> {
        self.actions
            .iter()
            .filter(|action| action.action_kind == kind)
            .map(|action| action.domain_name.clone())
            .collect()
    }

    /// Domains to hand to the browser automation delegate.
    #[must_use]
    pub fn toggle_list(&self) -> Vec<String> {
        self.names_of(ActionKind::ToggleAutoRenew)
    }

    /// Expired domains to reactivate through the registrar API.
    #[must_use]
    pub fn reactivate_list(&self) -> Vec<String> {
        self.names_of(ActionKind::ReactivateExpired)
    }

    /// Actions of one kind.
    pub fn actions_of(&self, kind: ActionKind) -> impl Iterator<Item = &ReconciliationAction> {
        self.actions
            .iter()
            .filter(move |action| action.action_kind == kind)
    }

    /// `(toggle_list, reactivate_list)`
    #[must_use]
    pub fn into_lists(self) -> (Vec<String>, Vec<String>) {
        let (toggle, reactivate): (Vec<_>, Vec<_>) = self
            .actions
            .into_iter()
            .partition(|action| action.action_kind == ActionKind::ToggleAutoRenew);
        (
            toggle.into_iter().map(|a| a.domain_name).collect(),
            reactivate.into_iter().map(|a| a.domain_name).collect(),
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
