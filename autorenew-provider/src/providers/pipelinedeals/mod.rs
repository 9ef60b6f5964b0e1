//! `PipelineDeals` CRM client

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::types::{ClientOptions, DealCredentials, DealFieldSchema};

pub(crate) use types::{DealListResponse, PipelineDealsEntry};

pub(crate) const PL_API_BASE: &str = "https://api.pipelinedeals.com/api/v3";
/// Deal listing endpoint, relative to the API base
pub(crate) const DEALS_PATH: &str = "deals.json";

/// `PipelineDeals` CRM client
///
/// Custom fields are translated into [`crate::types::DealEntry`] fields
/// through the configured [`DealFieldSchema`].
pub struct PipelinedealsProvider {
    pub(crate) client: Client,
    pub(crate) credentials: DealCredentials,
    pub(crate) schema: DealFieldSchema,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

impl PipelinedealsProvider {
    pub fn new(
        credentials: DealCredentials,
        schema: DealFieldSchema,
        options: ClientOptions,
    ) -> Self {
        Self {
            client: create_http_client(),
            credentials,
            schema,
            base_url: options.base_url.unwrap_or_else(|| PL_API_BASE.to_string()),
            max_retries: options.max_retries,
        }
    }
}
