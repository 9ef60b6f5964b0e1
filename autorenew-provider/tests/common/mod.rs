//! Shared helpers for the live API tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use autorenew_provider::{
    ClientOptions, DealCredentials, DealFieldSchema, DealProvider, RegistrarCredentials,
    RegistrarProvider, create_deal_provider, create_registrar_provider,
};

/// Skip the test when any of the listed environment variables is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it (failing the test otherwise)
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Retries used by the live tests; sandbox endpoints are flaky
const LIVE_MAX_RETRIES: u32 = 2;

fn live_options(url_var: &str) -> ClientOptions {
    ClientOptions {
        base_url: env::var(url_var).ok(),
        max_retries: LIVE_MAX_RETRIES,
    }
}

/// Registrar client from `NC_USER` / `NC_APIKEY` / `NC_IP` (and optional `NC_API_URL`)
pub fn registrar() -> Option<Arc<dyn RegistrarProvider>> {
    let credentials = RegistrarCredentials {
        api_user: env::var("NC_USER").ok()?,
        api_key: env::var("NC_APIKEY").ok()?,
        client_ip: env::var("NC_IP").ok()?,
    };
    Some(create_registrar_provider(
        credentials,
        live_options("NC_API_URL"),
    ))
}

/// CRM client from `PIPELINE_DEALS_API_KEY` (and optional `PIPELINE_DEALS_API_URL`)
pub fn deals() -> Option<Arc<dyn DealProvider>> {
    let credentials = DealCredentials {
        api_key: env::var("PIPELINE_DEALS_API_KEY").ok()?,
    };
    Some(create_deal_provider(
        credentials,
        DealFieldSchema::default(),
        live_options("PIPELINE_DEALS_API_URL"),
    ))
}
