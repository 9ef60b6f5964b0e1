//! `PipelineDeals` API type definitions

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// `GET deals.json` response
#[derive(Debug, Deserialize)]
pub struct DealListResponse {
    #[serde(default)]
    pub entries: Vec<PipelineDealsEntry>,
    pub pagination: PipelineDealsPagination,
}

#[derive(Debug, Deserialize)]
pub struct PipelineDealsPagination {
    #[serde(default)]
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct PipelineDealsEntry {
    pub id: u64,
    pub name: Option<String>,
    /// Integer code, but not guaranteed to be present or numeric
    #[serde(default)]
    pub status: Option<Value>,
    pub company: Option<PipelineDealsCompany>,
    #[serde(default)]
    pub custom_fields: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct PipelineDealsCompany {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct PipelineDealsErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}
