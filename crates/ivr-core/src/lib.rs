//! ivr-core: Voice responder core library
//!
//! Call flow engine for the microphone test line, the voice response
//! document builder it speaks through, and configuration shared by the
//! server crates.

pub mod config;
pub mod error;
pub mod flow;
pub mod twiml;

pub use config::{AppEnv, Config, ServerConfig};
pub use error::{Error, Result};
pub use flow::{CallStep, CallerInput, Transition};
pub use twiml::VoiceResponse;
