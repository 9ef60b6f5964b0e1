//! # autorenew-provider
//!
//! Typed clients for the two remote services the auto-renew reconciler
//! cross-references: the domain registrar and the sales CRM.
//!
//! ## Supported Providers
//!
//! | Provider | Role | Feature Flag | Wire format | Auth Method |
//! |----------|------|-------------|-------------|-------------|
//! | [Namecheap](https://www.namecheap.com/support/api/) | registrar | `namecheap` | XML | API user + key + whitelisted IP |
//! | [PipelineDeals](https://www.pipelinedeals.com/) | CRM | `pipelinedeals` | JSON | API key |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable both clients.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use autorenew_provider::{
//!     create_deal_provider, create_registrar_provider, ClientOptions, DealCredentials,
//!     DealFieldSchema, DealQueryParams, PaginationParams, RegistrarCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registrar = create_registrar_provider(
//!         RegistrarCredentials {
//!             api_user: "acme".to_string(),
//!             api_key: "your-key".to_string(),
//!             client_ip: "203.0.113.7".to_string(),
//!         },
//!         ClientOptions::default(),
//!     );
//!     let page = registrar.list_domains(&PaginationParams::default()).await?;
//!     println!("{} domains over {} pages", page.total_count, page.total_pages);
//!
//!     let crm = create_deal_provider(
//!         DealCredentials { api_key: "your-key".to_string() },
//!         DealFieldSchema::default(),
//!         ClientOptions::default(),
//!     );
//!     let deals = crm.list_deals(&DealQueryParams::default()).await?;
//!     for deal in &deals.items {
//!         println!("{} {:?} {}", deal.id, deal.domain_name, deal.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: key, user or client IP rejected
//! - [`ProviderError::DomainNotFound`]: domain not in this account
//! - [`ProviderError::ParseError`]: response did not have the expected shape
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failures
//!
//! Transient errors are retried with exponential backoff only when the
//! client is built with [`ClientOptions::max_retries`] above zero.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
#[cfg(feature = "pipelinedeals")]
pub use factory::create_deal_provider;
#[cfg(feature = "namecheap")]
pub use factory::create_registrar_provider;

// Re-export public traits (internal error mapping traits are not exported)
pub use traits::{DealProvider, RegistrarProvider};

// Re-export types
pub use types::{
    ClientOptions, DealCompany, DealCredentials, DealEntry, DealFieldSchema, DealQueryParams,
    DealStatus, PaginatedResponse, PaginationParams, ReactivateDomainRequest,
    ReactivateDomainResult, RegistrarCredentials, RegistrarDomain, page_count,
};

// Re-export utils modules
pub use utils::{datetime, log_sanitizer};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "namecheap")]
pub use providers::NamecheapProvider;

#[cfg(feature = "pipelinedeals")]
pub use providers::PipelinedealsProvider;
