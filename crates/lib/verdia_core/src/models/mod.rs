//! Domain models shared across the client crates.
//!
//! Wire models use `camelCase` renames — the Verdia API speaks camelCase JSON.

pub mod auth;
pub mod chat;
