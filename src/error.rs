//! Error types for the face gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Eye contour collapsed to zero horizontal extent; the aperture ratio
    /// is undefined for this frame
    #[error("degenerate eye geometry: horizontal eye distance is zero")]
    DegenerateEyeGeometry,

    /// Invalid input parameters provided
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Input sink refused or failed a command
    #[error("input sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
