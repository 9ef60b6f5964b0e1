//! Shared request pipeline
//!
//! Each client builds its own `RequestBuilder` (query-string auth, URL layout)
//! and hands it here for sending, retrying and body decoding.
//!
//! Both services carry their API key in the query string, so every `reqwest`
//! error is stripped of its URL before it is logged or wrapped, and requests
//! are only ever logged by their [`CallLabel`].

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Longest wait honoured from a `Retry-After` header.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Ceiling for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;
const BASE_BACKOFF_MS: u64 = 100;

/// What a request is, for logs and error attribution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallLabel<'a> {
    /// Provider identifier (`"namecheap"`, `"pipelinedeals"`).
    pub provider: &'a str,
    /// Registrar command or CRM path. Never the full URL.
    pub action: &'a str,
}

impl CallLabel<'_> {
    fn network_error(&self, detail: impl Into<String>) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider.to_string(),
            detail: detail.into(),
        }
    }
}

/// Status and body of a response that made it past the transport checks.
#[derive(Debug)]
pub(crate) struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Send once.
///
/// 429 becomes `RateLimited` and 502-504 become `NetworkError`; every other
/// status is handed back for the caller's own error mapping.
async fn send(request: RequestBuilder, label: CallLabel<'_>) -> Result<HttpReply, ProviderError> {
    let provider = label.provider;
    log::debug!("[{provider}] GET {}", label.action);

    let response = request.send().await.map_err(|e| {
        let e = e.without_url();
        if e.is_timeout() {
            ProviderError::Timeout {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        } else {
            label.network_error(e.to_string())
        }
    })?;

    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response
        .text()
        .await
        .map_err(|e| label.network_error(format!("reading body: {}", e.without_url())))?;
    log::debug!(
        "[{provider}] {} -> HTTP {status}: {}",
        label.action,
        truncate_for_log(&body)
    );

    match status {
        429 => {
            log::warn!("[{provider}] {} throttled, retry_after={retry_after:?}", label.action);
            Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            })
        }
        502..=504 => {
            log::warn!("[{provider}] {} hit a gateway error (HTTP {status})", label.action);
            Err(label.network_error(format!("HTTP {status}: {}", truncate_for_log(&body))))
        }
        _ => Ok(HttpReply { status, body }),
    }
}

/// Send, retrying retryable failures up to `max_retries` more times.
///
/// With `max_retries == 0` the request goes out exactly once. Waits double
/// from 100ms up to 10s, or follow the server's `Retry-After` up to 30s.
pub(crate) async fn send_with_retry(
    request: RequestBuilder,
    label: CallLabel<'_>,
    max_retries: u32,
) -> Result<HttpReply, ProviderError> {
    let mut attempt = 0;
    loop {
        // a streaming body cannot be cloned; such requests get one shot
        let Some(this_try) = request.try_clone().filter(|_| attempt < max_retries) else {
            return send(request, label).await;
        };

        match send(this_try, label).await {
            Err(e) if e.is_retryable() => {
                let delay = retry_delay(&e, attempt);
                attempt += 1;
                log::warn!(
                    "[{}] {} failed (try {attempt} of {}), waiting {:.1}s: {e}",
                    label.provider,
                    label.action,
                    max_retries + 1,
                    delay.as_secs_f32()
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}

/// Decode a JSON body.
pub(crate) fn parse_json<T: DeserializeOwned>(
    body: &str,
    provider: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| decode_failure(provider, "JSON", body, &e))
}

/// Decode an XML body.
pub(crate) fn parse_xml<T: DeserializeOwned>(
    body: &str,
    provider: &str,
) -> Result<T, ProviderError> {
    quick_xml::de::from_str(body).map_err(|e| decode_failure(provider, "XML", body, &e))
}

fn decode_failure(
    provider: &str,
    format: &str,
    body: &str,
    error: &dyn std::fmt::Display,
) -> ProviderError {
    log::error!(
        "[{provider}] {format} decode failed: {error}; body: {}",
        truncate_for_log(body)
    );
    ProviderError::ParseError {
        provider: provider.to_string(),
        detail: error.to_string(),
    }
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    match error {
        ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } => Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS)),
        _ => backoff_delay(attempt),
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1_u64 << attempt.min(20);
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor).min(MAX_BACKOFF_MS))
}
