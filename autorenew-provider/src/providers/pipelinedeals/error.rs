//! `PipelineDeals` error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::PipelinedealsProvider;

/// `PipelineDeals` signals errors through the HTTP status only
impl ProviderErrorMapper for PipelinedealsProvider {
    fn provider_name(&self) -> &'static str {
        "pipelinedeals"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match context.http_status {
            Some(401) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some(403) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some(422) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "query".to_string(),
                detail: raw.message,
            },
            _ => self.unknown_error(raw),
        }
    }
}
