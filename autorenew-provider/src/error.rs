use serde::{Deserialize, Serialize};

/// Unified error type for all registrar and CRM operations.
///
/// Each variant includes a `provider` field identifying which remote service
/// produced the error, plus variant-specific context. All variants are
/// serializable for structured error reporting.
///
/// # Retryable Errors
///
/// Transient failures, retried only when a client has `max_retries > 0`:
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection reset, bad gateway).
    NetworkError {
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API key, user or whitelisted client IP was rejected.
    InvalidCredentials {
        provider: String,
        /// Message from the API response.
        raw_message: Option<String>,
    },

    /// The authenticated account may not act on the requested resource.
    PermissionDenied {
        provider: String,
        /// Message from the API response.
        raw_message: Option<String>,
    },

    /// The domain is unknown to the registrar or not owned by this account.
    DomainNotFound {
        provider: String,
        /// Domain name that was not found.
        domain: String,
        /// Message from the API response.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (e.g. out-of-range page size, bad years value).
    InvalidParameter {
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Message from the API response.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout {
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The response body could not be decoded into the expected shape.
    ParseError {
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is an expected outcome (bad input, missing resource),
    /// used to choose the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether a retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Name of the provider that produced the error.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

/// `": msg"` when the API supplied a message, empty otherwise.
struct Detail<'a>(&'a Option<String>);

impl std::fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(msg) => write!(f, ": {msg}"),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => write!(f, "[{provider}] Invalid credentials{}", Detail(raw_message)),
            Self::PermissionDenied {
                provider,
                raw_message,
            } => write!(f, "[{provider}] Permission denied{}", Detail(raw_message)),
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => write!(
                f,
                "[{provider}] Domain '{domain}' not found{}",
                Detail(raw_message)
            ),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::RateLimited {
                provider,
                retry_after: Some(secs),
                ..
            } => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
            Self::RateLimited { provider, .. } => write!(f, "[{provider}] Rate limited"),
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "namecheap".to_string(),
            detail: "connection reset".to_string(),
        };
        assert_eq!(e.to_string(), "[namecheap] Network error: connection reset");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "namecheap".to_string(),
            raw_message: Some("Invalid request IP".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[namecheap] Invalid credentials: Invalid request IP"
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "pipelinedeals".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[pipelinedeals] Invalid credentials");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ProviderError::DomainNotFound {
            provider: "namecheap".to_string(),
            domain: "example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[namecheap] Domain 'example.com' not found");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "pipelinedeals".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[pipelinedeals] Rate limited (retry after 30s)"
        );
    }

    #[test]
    fn display_parse_error() {
        let e = ProviderError::ParseError {
            provider: "namecheap".to_string(),
            detail: "missing field `Paging`".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[namecheap] Parse error: missing field `Paging`"
        );
    }

    #[test]
    fn display_unknown() {
        let e = ProviderError::Unknown {
            provider: "namecheap".to_string(),
            raw_code: Some("5050900".to_string()),
            raw_message: "Unhandled exceptions".to_string(),
        };
        assert_eq!(e.to_string(), "[namecheap] Unhandled exceptions");
    }

    #[test]
    fn serialize_tags_variant_code() {
        let e = ProviderError::RateLimited {
            provider: "pipelinedeals".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn retryable_variants() {
        assert!(
            ProviderError::NetworkError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_retryable()
        );
        assert!(
            ProviderError::Timeout {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::ParseError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::InvalidCredentials {
                provider: "t".into(),
                raw_message: None,
            }
            .is_retryable()
        );
    }

    #[test]
    fn expected_variants_log_as_warnings() {
        assert!(
            ProviderError::DomainNotFound {
                provider: "t".into(),
                domain: "x.com".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::NetworkError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn provider_accessor() {
        let e = ProviderError::Timeout {
            provider: "namecheap".into(),
            detail: "30s".into(),
        };
        assert_eq!(e.provider(), "namecheap");
    }
}
