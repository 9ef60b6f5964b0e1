//! `PipelineDeals` HTTP request method

use std::fmt::Write;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{self, CallLabel};
use crate::providers::common::join_url;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::PipelinedealsProvider;
use super::types::PipelineDealsErrorBody;

impl PipelinedealsProvider {
    /// Execute a GET request; `query` excludes the API key, which is added here
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut url = format!(
            "{}?api_key={}",
            join_url(&self.base_url, path),
            urlencoding::encode(&self.credentials.api_key)
        );
        for (key, value) in query {
            let _ = write!(url, "&{key}={}", urlencoding::encode(value));
        }

        let request = self.client.get(&url);

        // the URL carries the API key; only the path is logged
        let label = CallLabel {
            provider: self.provider_name(),
            action: path,
        };
        let reply = http_client::send_with_retry(request, label, self.max_retries).await?;

        self.decode(reply.status, &reply.body)
    }

    /// Decode a response body, mapping non-2xx statuses through the error mapper
    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        http_status: u16,
        response_text: &str,
    ) -> Result<T> {
        if (200..300).contains(&http_status) {
            return http_client::parse_json(response_text, self.provider_name());
        }

        let message = serde_json::from_str::<PipelineDealsErrorBody>(response_text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| truncate_for_log(response_text));

        log::error!(
            "[{}] API error (HTTP {http_status}): {message}",
            self.provider_name()
        );

        Err(self.map_error(
            RawApiError::with_code(http_status.to_string(), message),
            ErrorContext {
                http_status: Some(http_status),
                ..ErrorContext::default()
            },
        ))
    }
}
