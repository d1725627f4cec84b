//! Error types for the now-playing client and playback.

use thiserror::Error;

/// Errors raised while talking to the station or driving playback.
///
/// None of these escape the poll loop: the controller logs them and turns
/// them into fallback text on screen.
#[derive(Debug, Error)]
pub enum RadioError {
    /// Request could not be sent, or the connection dropped / timed out
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Body was not a now-playing document
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Media backend reported a failure
    #[error("Playback error: {0}")]
    Playback(String),

    /// Station settings are unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RadioError>;
