//! Poster sync error types.

/// Errors produced while loading candidates or talking to the media library.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library error: {0}")]
    Library(String),

    #[error("upload failed: {0}")]
    Upload(String),
}
