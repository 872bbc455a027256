//! API Access
//!
//! Everything that leaves the browser for the PHR backend.

pub mod client;

pub use client::{get_api_base, BrowserSubmissionClient};
