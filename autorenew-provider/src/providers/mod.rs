//! Remote service client implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "namecheap")]
mod namecheap;
#[cfg(feature = "pipelinedeals")]
mod pipelinedeals;

#[cfg(feature = "namecheap")]
pub use namecheap::NamecheapProvider;
#[cfg(feature = "pipelinedeals")]
pub use pipelinedeals::PipelinedealsProvider;
