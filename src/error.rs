//! Centralized error types for the chase.
//!
//! Nothing here is recoverable: every variant means the page cannot animate, and is
//! surfaced to the host's default error channel.

/// Main error type.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("2D rendering context unavailable")]
    ContextUnavailable,

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Host environment errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Console initialization failed: {0}")]
    ConsoleInit(String),

    #[error("No global `window` available")]
    NoWindow,

    #[error("No `document` on window")]
    NoDocument,

    #[error("Failed to {action} `{event}` listener: {reason}")]
    Listener {
        action: &'static str,
        event: String,
        reason: String,
    },

    #[error("requestAnimationFrame failed: {0}")]
    AnimationFrame(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
}

/// Result type for chase operations.
pub type GameResult<T> = Result<T, GameError>;
