//! Browser automation delegate adapters
//!
//! The core only sees [`AutoRenewToggler`](autorenew_core::AutoRenewToggler).
//! The binary picks one of these depending on configuration:
//! - **`CommandToggler`**: runs an external program once per domain.
//! - **`LogOnlyToggler`**: no program configured; reports what it would toggle.

mod command_toggler;
mod log_only_toggler;

pub use command_toggler::CommandToggler;
pub use log_only_toggler::LogOnlyToggler;
