//! Namecheap API type definitions
//!
//! Every response is an `<ApiResponse>` document. Domain and result data live
//! in attributes; paging lives in child elements.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::providers::common::deserialize_flag;
use crate::utils::datetime::deserialize_us_date;

/// Status / error part of every `<ApiResponse>`, decoded before the payload
#[derive(Debug, Deserialize)]
pub struct NamecheapEnvelope {
    #[serde(rename = "@Status", default)]
    pub status: String,
    #[serde(rename = "Errors", default)]
    pub errors: NamecheapErrors,
}

impl NamecheapEnvelope {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("OK") && self.errors.items.is_empty()
    }
}

/// `<ApiResponse>` with its `<CommandResponse>` payload
#[derive(Debug, Deserialize)]
pub struct NamecheapResponse<T> {
    #[serde(rename = "CommandResponse")]
    pub command_response: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NamecheapErrors {
    #[serde(rename = "Error", default)]
    pub items: Vec<NamecheapError>,
}

#[derive(Debug, Deserialize)]
pub struct NamecheapError {
    #[serde(rename = "@Number")]
    pub number: Option<String>,
    #[serde(rename = "$text", default)]
    pub message: String,
}

/// `namecheap.domains.getList` payload
#[derive(Debug, Deserialize)]
pub struct DomainGetListResponse {
    #[serde(rename = "DomainGetListResult", default)]
    pub result: Option<DomainGetListResult>,
    #[serde(rename = "Paging")]
    pub paging: NamecheapPaging,
}

/// Repeated `<Domain>` elements; one element and many decode the same way
#[derive(Debug, Default, Deserialize)]
pub struct DomainGetListResult {
    #[serde(rename = "Domain", default)]
    pub domains: Vec<NamecheapDomain>,
}

#[derive(Debug, Deserialize)]
pub struct NamecheapPaging {
    #[serde(rename = "TotalItems")]
    pub total_items: u32,
    #[serde(rename = "CurrentPage")]
    pub current_page: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
}

/// `<Domain .../>` element
#[derive(Debug, Deserialize)]
pub struct NamecheapDomain {
    #[serde(rename = "@ID")]
    pub id: u64,
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@User", default)]
    pub user: String,
    #[serde(rename = "@Created", default, deserialize_with = "deserialize_us_date")]
    pub created: Option<NaiveDate>,
    #[serde(rename = "@Expires", default, deserialize_with = "deserialize_us_date")]
    pub expires: Option<NaiveDate>,
    #[serde(rename = "@IsExpired", deserialize_with = "deserialize_flag")]
    pub is_expired: bool,
    #[serde(rename = "@IsLocked", default, deserialize_with = "deserialize_flag")]
    pub is_locked: bool,
    #[serde(rename = "@AutoRenew", deserialize_with = "deserialize_flag")]
    pub auto_renew: bool,
    #[serde(rename = "@WhoisGuard", default)]
    pub whois_guard: String,
    #[serde(rename = "@IsPremium", default, deserialize_with = "deserialize_flag")]
    pub is_premium: bool,
    #[serde(rename = "@IsOurDNS", default, deserialize_with = "deserialize_flag")]
    pub is_our_dns: bool,
}

/// `namecheap.domains.reactivate` payload
#[derive(Debug, Deserialize)]
pub struct DomainReactivateResponse {
    #[serde(rename = "DomainReactivateResult")]
    pub result: DomainReactivateResult,
}

#[derive(Debug, Deserialize)]
pub struct DomainReactivateResult {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@IsSuccess", deserialize_with = "deserialize_flag")]
    pub is_success: bool,
    #[serde(rename = "@ChargedAmount")]
    pub charged_amount: Option<f64>,
    #[serde(rename = "@OrderID")]
    pub order_id: Option<u64>,
    #[serde(rename = "@TransactionID")]
    pub transaction_id: Option<u64>,
}
