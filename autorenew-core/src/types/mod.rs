//! Type definition module

mod deal;
mod fetch;
mod reconcile;
mod run;

pub use deal::{
    DealRecord, Disqualification, QualificationRules, QualifiedDeals, RejectionTally,
    PURCHASED_BY_US_CODE,
};
pub use fetch::{DirectoryOptions, DirectorySource, FetchOutcome, PageRangePolicy, SkippedPage};
pub use reconcile::{
    ActionKind, DuplicatePolicy, ReconcileOptions, ReconciliationAction, ReconciliationPlan,
};
pub use run::{
    auto_renew_message, PhaseTimings, ReactivationFailure, ReactivationReport, RunOptions,
    RunSummary, ToggleFailure, ToggleOutcome,
};

// Re-export public types of the provider library
pub use autorenew_provider::{
    page_count, DealCompany, DealEntry, DealQueryParams, DealStatus, PaginatedResponse,
    PaginationParams, ReactivateDomainRequest, ReactivateDomainResult, RegistrarDomain,
};
