use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Pagination parameters for the registrar domain listing.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 100,
        }
    }
}

impl PaginationParams {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `min_page_size..=max_page_size`
    #[must_use]
    pub fn validated(&self, min_page_size: u32, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(min_page_size, max_page_size),
        }
    }
}

/// Query parameters for the CRM deal listing.
///
/// `page = None` asks for the service's default first page, which is how the
/// page count is discovered before iterating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealQueryParams {
    /// Page number (1-indexed), or `None` for the service default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Entries per page, or `None` for the service default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl DealQueryParams {
    /// Query for a specific page with the service's default page size.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// Number of pages needed to hold `total_items` at `page_size` per page.
///
/// A zero page size yields zero pages.
#[must_use]
pub fn page_count(total_items: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// A paginated response wrapper.
///
/// Returned by all list operations. Contains the current page of items
/// along with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a paginated response from an item total, deriving the page count.
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let total_pages = page_count(total_count, page_size);
        Self::with_total_pages(items, page, page_size, total_count, total_pages)
    }

    /// Create a paginated response when the service reports the page count itself.
    pub fn with_total_pages(
        items: Vec<T>,
        page: u32,
        page_size: u32,
        total_count: u32,
        total_pages: u32,
    ) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_more: page < total_pages,
        }
    }
}

// ============ Registrar Types ============

/// A domain registered at the registrar, as of fetch time.
///
/// Read-only snapshot: never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarDomain {
    /// Registrar-assigned unique id.
    pub id: u64,
    /// Registered domain name; the key used for matching against deals.
    pub name: String,
    /// Account the domain is registered under.
    pub user: String,
    /// Registration date.
    pub created_at: Option<NaiveDate>,
    /// Expiration date.
    pub expires_at: Option<NaiveDate>,
    /// Whether the registration has lapsed.
    pub is_expired: bool,
    /// Whether the domain is locked against changes.
    pub is_locked: bool,
    /// Whether the registrar will renew the domain automatically.
    pub auto_renew_enabled: bool,
    /// WHOIS privacy status as reported (`ENABLED`, `NOTPRESENT`, ...).
    pub whois_guard: String,
    /// Whether the domain is a premium name.
    pub is_premium: bool,
    /// Whether the registrar's own DNS serves the domain.
    pub is_our_dns: bool,
}

/// Request to renew an already expired domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateDomainRequest {
    /// Domain to reactivate.
    pub domain_name: String,
    /// Renewal period in years.
    pub years_to_add: u32,
    /// Whether the domain is a premium name (priced differently).
    pub is_premium: bool,
}

impl ReactivateDomainRequest {
    /// One-year, non-premium reactivation.
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            years_to_add: 1,
            is_premium: false,
        }
    }
}

/// Outcome of a reactivation call that the registrar accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateDomainResult {
    /// Domain the registrar reports as reactivated.
    pub domain_name: String,
    /// Registrar's own success flag.
    pub is_success: bool,
    /// Amount charged, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged_amount: Option<f64>,
    /// Order id, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    /// Transaction id, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<u64>,
}

// ============ CRM Types ============

/// Red / yellow / green health flag of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    /// `1`: lost or at risk.
    Red,
    /// `2`
    Yellow,
    /// `3`
    Green,
    /// Missing or outside `1..=3`.
    Unknown,
}

impl DealStatus {
    /// Map the CRM's integer status code.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Red,
            Some(2) => Self::Yellow,
            Some(3) => Self::Green,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Yellow => write!(f, "yellow"),
            Self::Green => write!(f, "green"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Company a deal belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DealCompany {
    /// CRM company id.
    pub id: Option<u64>,
    /// Company display name.
    pub name: Option<String>,
}

/// A CRM deal after its custom fields have been translated through a
/// [`DealFieldSchema`].
///
/// Nothing is filtered at this level; every field the qualification rules
/// look at is optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealEntry {
    /// CRM deal id.
    pub id: u64,
    /// Deal title.
    pub name: Option<String>,
    /// Health flag.
    pub status: DealStatus,
    /// Owning company.
    pub company: Option<DealCompany>,
    /// Linked domain name (custom field).
    pub domain_name: Option<String>,
    /// How the domain was purchased (custom dropdown value id).
    pub purchase_channel_code: Option<i64>,
    /// When the purchase was confirmed (custom date field, as sent).
    pub purchase_confirmed_date: Option<String>,
}

/// Identifiers of the CRM custom fields the reconciler reads.
///
/// These are opaque, account-specific ids; the defaults are the ones of the
/// production account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealFieldSchema {
    /// Field holding the domain URL.
    pub domain_field: String,
    /// Field holding the purchase-channel dropdown value.
    pub purchase_channel_field: String,
    /// Field holding the purchase-confirmed date.
    pub purchase_confirmed_field: String,
}

impl Default for DealFieldSchema {
    fn default() -> Self {
        Self {
            domain_field: "custom_label_1454434".to_string(),
            purchase_channel_field: "custom_label_1457620".to_string(),
            purchase_confirmed_field: "custom_label_2154033".to_string(),
        }
    }
}

// ============ Credentials & Options ============

/// Registrar API credentials.
///
/// The registrar authenticates by user, key and a whitelisted client IP; the
/// API user doubles as the `UserName` the commands act on.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarCredentials {
    /// API user (and account user name).
    pub api_user: String,
    /// API key.
    pub api_key: String,
    /// Whitelisted IP address the requests originate from.
    pub client_ip: String,
}

impl std::fmt::Debug for RegistrarCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarCredentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .field("client_ip", &self.client_ip)
            .finish()
    }
}

/// CRM API credentials.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCredentials {
    /// API key.
    pub api_key: String,
}

impl std::fmt::Debug for DealCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealCredentials")
            .field("api_key", &"***")
            .finish()
    }
}

/// Transport options shared by all clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    /// Override of the API base URL (sandbox, proxy, tests).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Retries for transient failures; `0` sends every request exactly once.
    pub max_retries: u32,
}
