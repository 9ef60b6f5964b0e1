//! Collaborator abstraction trait definition

mod auto_renew_toggler;

pub use auto_renew_toggler::AutoRenewToggler;
