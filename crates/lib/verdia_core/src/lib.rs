//! # verdia_core
//!
//! Core domain logic for the Verdia client.

pub mod models;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
