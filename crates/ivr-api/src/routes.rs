//! Route definitions
//!
//! Webhook paths come from the call flow so redirects in the documents and
//! the router can never disagree.

use axum::{
    routing::{get, post},
    Router,
};

use ivr_core::flow::{PLAYBACK_PATH, RECORD_PATH, VOICE_PATH, VOICE_REPEAT_PATH};

use crate::handlers::{health, playback, record, voice, voice_repeat};
use crate::server::AppState;

/// Create the webhook router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Provider webhooks
        .route(VOICE_PATH, post(voice))
        .route(VOICE_REPEAT_PATH, post(voice_repeat))
        .route(RECORD_PATH, post(record))
        .route(PLAYBACK_PATH, post(playback))
}
