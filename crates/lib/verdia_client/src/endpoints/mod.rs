//! Typed bindings for the protected API surface.
//!
//! Pass-through by design: one method per endpoint, descriptor in,
//! deserialized JSON out. Failure handling lives in the gateway; no business
//! logic here.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod orders;
pub mod seller;
pub mod tips;
