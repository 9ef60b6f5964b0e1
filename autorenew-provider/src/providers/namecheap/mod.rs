//! Namecheap registrar client

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::types::{ClientOptions, RegistrarCredentials};

pub(crate) use types::{
    DomainGetListResponse, DomainReactivateResponse, NamecheapDomain, NamecheapEnvelope,
    NamecheapResponse,
};

pub(crate) const NC_API_BASE: &str = "https://api.namecheap.com/xml.response";
/// Smallest `PageSize` accepted by `namecheap.domains.getList`
pub(crate) const MIN_PAGE_SIZE: u32 = 10;
/// Largest `PageSize` accepted by `namecheap.domains.getList`
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Namecheap registrar client
pub struct NamecheapProvider {
    pub(crate) client: Client,
    pub(crate) credentials: RegistrarCredentials,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

impl NamecheapProvider {
    pub fn new(credentials: RegistrarCredentials, options: ClientOptions) -> Self {
        Self {
            client: create_http_client(),
            credentials,
            base_url: options.base_url.unwrap_or_else(|| NC_API_BASE.to_string()),
            max_retries: options.max_retries,
        }
    }
}
