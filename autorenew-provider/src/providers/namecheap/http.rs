//! Namecheap HTTP request method
//!
//! Every command is a GET against the same endpoint; the command name and
//! the credentials travel as query parameters.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{self, CallLabel};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{NamecheapEnvelope, NamecheapProvider, NamecheapResponse};

impl NamecheapProvider {
    /// Execute a registrar command and decode its `<CommandResponse>`
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let mut query: Vec<(&str, String)> = vec![
            ("ApiUser", self.credentials.api_user.clone()),
            ("ApiKey", self.credentials.api_key.clone()),
            ("UserName", self.credentials.api_user.clone()),
            ("ClientIp", self.credentials.client_ip.clone()),
            ("Command", command.to_string()),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.clone())));

        let request = self.client.get(&self.base_url).query(&query);

        let label = CallLabel {
            provider: self.provider_name(),
            action: command,
        };
        let reply = http_client::send_with_retry(request, label, self.max_retries).await?;

        self.decode(reply.status, &reply.body, ctx)
    }

    /// Decode a raw `<ApiResponse>` body
    ///
    /// API errors are reported inside the document (usually with HTTP 200), so
    /// the status and error list are checked before the payload is decoded.
    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        http_status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let envelope: NamecheapEnvelope =
            match http_client::parse_xml(response_text, self.provider_name()) {
                Ok(envelope) => envelope,
                Err(_) if !(200..300).contains(&http_status) => {
                    return Err(self.map_error(
                        RawApiError::with_code(
                            http_status.to_string(),
                            format!("HTTP {http_status}"),
                        ),
                        ErrorContext {
                            http_status: Some(http_status),
                            ..ctx
                        },
                    ));
                }
                Err(e) => return Err(e),
            };

        if !envelope.is_ok() {
            let raw = envelope.errors.items.into_iter().next().map_or_else(
                || RawApiError::new(format!("Status {}", envelope.status)),
                |err| match err.number {
                    Some(number) => RawApiError::with_code(number, err.message.trim()),
                    None => RawApiError::new(err.message.trim()),
                },
            );
            log::error!(
                "[{}] API error {}: {}",
                self.provider_name(),
                raw.code.as_deref().unwrap_or("-"),
                raw.message
            );
            return Err(self.map_error(raw, ctx));
        }

        let response: NamecheapResponse<T> =
            http_client::parse_xml(response_text, self.provider_name())?;
        response
            .command_response
            .ok_or_else(|| self.parse_error("Response has no CommandResponse element"))
    }
}
