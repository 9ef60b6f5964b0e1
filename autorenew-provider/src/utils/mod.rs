//! Utility modules.

/// Date parsing helpers for registrar payloads.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
