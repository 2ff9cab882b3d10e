//! Error types for ivr-core

use thiserror::Error;

/// Main error type for ivr-core
///
/// Caller input never produces one of these: absent recordings and keypresses
/// are ordinary branches of the call flow.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document rendering error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ivr-core
pub type Result<T> = std::result::Result<T, Error>;
