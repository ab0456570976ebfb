use std::path::PathBuf;

/// Errors surfaced by the canvas engine's file operations.
///
/// Every variant is recoverable: the canvas is left exactly as it was before
/// the failing call.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The file could not be read or decoded as an image
    #[error("cannot load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The buffer could not be encoded or written
    #[error("cannot save image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type CanvasResult<T> = Result<T, CanvasError>;
