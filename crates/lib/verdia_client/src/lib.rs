//! # verdia_client
//!
//! HTTP and realtime client for the Verdia API.
//!
//! The centerpiece is [`ApiClient`], the authorized request gateway: it
//! attaches the bearer credential to every protected call, and on a 401
//! transparently refreshes the access token (at most once per request,
//! single-flighted across concurrent requests) before replaying. Typed
//! endpoint bindings live in [`auth`] and [`endpoints`]; the chat push
//! channel in [`realtime`].

pub mod auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod realtime;
pub mod request;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use gateway::ApiClient;
pub use request::ApiRequest;
