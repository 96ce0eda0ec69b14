//! API client module
//!
//! Blocking HTTP client for the applicant-tracking service.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::*;
