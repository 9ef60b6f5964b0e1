//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use autorenew_provider::ProviderError;

/// Core layer error type
///
/// Only fatal conditions are errors here. A failed page or a deal that does
/// not qualify is recorded in the fetch outcome instead.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Invalid input to a service (empty domain list, zero page size, ...)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The browser automation delegate could not run at all
    #[error("Automation failure: {0}")]
    AutomationFailure(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error is an expected outcome, used to choose the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::AutomationFailure(_) => false,
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
