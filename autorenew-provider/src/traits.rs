use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    DealEntry, DealQueryParams, PaginatedResponse, PaginationParams, ReactivateDomainRequest,
    ReactivateDomainResult, RegistrarDomain,
};

/// Raw API error (internal)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information available while mapping an error (internal)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Domain the failed request was about (for `DomainNotFound`)
    pub domain: Option<String>,
    /// HTTP status of the response, when the error came from the status line
    pub http_status: Option<u16>,
}

impl ErrorContext {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            http_status: None,
        }
    }
}

/// Maps a provider's native errors onto [`ProviderError`] (internal)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Registrar API: the system of record for registrations, expiry and
/// auto-renew state.
#[async_trait]
pub trait RegistrarProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Fetch one page of the account's domains.
    ///
    /// The response's `total_count` is the registrar's item total across all
    /// pages, so a first call doubles as the page-count probe.
    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<RegistrarDomain>>;

    /// Renew an already expired domain.
    async fn reactivate_domain(
        &self,
        req: &ReactivateDomainRequest,
    ) -> Result<ReactivateDomainResult>;
}

/// CRM API: the deal list the reconciler cross-references.
#[async_trait]
pub trait DealProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Fetch one page of deals, custom fields already translated.
    ///
    /// The response's `total_pages` is the page count the CRM reports.
    async fn list_deals(&self, params: &DealQueryParams) -> Result<PaginatedResponse<DealEntry>>;
}
