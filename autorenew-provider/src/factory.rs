//! Provider factory functions.

use std::sync::Arc;

use crate::traits::{DealProvider, RegistrarProvider};
use crate::types::{ClientOptions, DealCredentials, DealFieldSchema, RegistrarCredentials};

#[cfg(feature = "namecheap")]
use crate::providers::NamecheapProvider;
#[cfg(feature = "pipelinedeals")]
use crate::providers::PipelinedealsProvider;

/// Creates the registrar client.
///
/// The returned provider is wrapped in `Arc<dyn RegistrarProvider>` so it can
/// be shared across concurrent page fetches.
///
/// # Examples
///
/// ```rust,no_run
/// use autorenew_provider::{create_registrar_provider, ClientOptions, RegistrarCredentials};
///
/// let registrar = create_registrar_provider(
///     RegistrarCredentials {
///         api_user: "acme".to_string(),
///         api_key: "your-key".to_string(),
///         client_ip: "203.0.113.7".to_string(),
///     },
///     ClientOptions::default(),
/// );
/// ```
#[cfg(feature = "namecheap")]
pub fn create_registrar_provider(
    credentials: RegistrarCredentials,
    options: ClientOptions,
) -> Arc<dyn RegistrarProvider> {
    Arc::new(NamecheapProvider::new(credentials, options))
}

/// Creates the CRM client, translating custom fields through `schema`.
#[cfg(feature = "pipelinedeals")]
pub fn create_deal_provider(
    credentials: DealCredentials,
    schema: DealFieldSchema,
    options: ClientOptions,
) -> Arc<dyn DealProvider> {
    Arc::new(PipelinedealsProvider::new(credentials, schema, options))
}
