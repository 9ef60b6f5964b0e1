use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer};

// ============ HTTP Client ============

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with the default timeouts
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

/// Join a base URL and a path without doubling or dropping the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ============ Flags ============

/// Parse a string-typed boolean (`"True"`, `"false"`, ...) case-insensitively
pub fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Serde adapter for string-typed booleans
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| Error::custom(format!("Invalid boolean flag '{raw}'")))
}
