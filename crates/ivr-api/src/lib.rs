//! ivr-api: Webhook server for the voice responder
//!
//! Exposes the call flow to the telephony provider over HTTP.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{build_router, start_server, AppState};
