//! Error types for the converter

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an archive
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the rendering engine
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load the archive
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// The in-page measurement could not be evaluated or decoded
    #[error("Content measurement failed: {0}")]
    MeasureError(String),

    /// Failed to configure the viewport or export the document
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Reading the input path or writing the output file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),

    /// The engine worker thread exited before answering
    #[error("Engine worker is no longer running")]
    WorkerGone,
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}
