//! Namecheap error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NamecheapProvider;

/// Namecheap error number mapping
/// Reference: <https://www.namecheap.com/support/api/error-codes/>
impl ProviderErrorMapper for NamecheapProvider {
    fn provider_name(&self) -> &'static str {
        "namecheap"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        // Throttling is reported as a plain message rather than a dedicated number
        if raw.message.to_ascii_lowercase().contains("too many requests") {
            return ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }

        match raw.code.as_deref() {
            // Authentication / account errors
            // 1010101, 1010102: ApiUser / ApiKey missing
            // 1011102: API Key is invalid or API access has not been enabled
            // 1010105, 1011105: ClientIp missing / invalid
            // 1011150: RequestIP is invalid
            // 1017150: RequestIP is disabled or locked
            // 1017105: ClientIP is disabled or locked
            // 1017101, 1017103: ApiUser disabled / UserName disabled
            // 1016103, 1019103: UserName unavailable
            // 1050900: Unknown error when validating apiuser
            // 1030408: Unsupported authentication type
            Some(
                "1010101" | "1010102" | "1011102" | "1010105" | "1011105" | "1011150"
                | "1017150" | "1017105" | "1017101" | "1017103" | "1016103" | "1019103"
                | "1050900" | "1030408",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Domain not found / not in this account
            // 2019166: Domain not found
            // 2016166: Domain is not associated with your account
            Some("2019166" | "2016166") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 2030166: Edit permission for domain is not supported
            Some("2030166") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}
