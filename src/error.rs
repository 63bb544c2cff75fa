use std::path::PathBuf;

use thiserror::Error;

/// Library error type for image session operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be read or decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The codec failed to write the target file.
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Save target does not end in a recognized image extension.
    #[error("save error: bad format or filename: {}", .0.display())]
    SaveFormat(PathBuf),

    /// The operation needs a current image but the session is empty.
    #[error("no image loaded")]
    NoImageLoaded,

    /// Raw bytes do not fit the declared width, height and stride.
    #[error("invalid buffer layout: {0}")]
    Layout(String),

    /// Degenerate buffer or invalid filter parameters.
    #[error("filter error: {0}")]
    Filter(String),

    /// The directory of the current image is missing or unreadable.
    #[error("invalid image directory: {0}")]
    BadDir(String),

    /// The current image no longer appears in its directory listing.
    #[error("{} is not present in its directory listing", .0.display())]
    NotListed(PathBuf),

    /// Zoom factors must be finite and positive.
    #[error("invalid zoom factor: {0}")]
    InvalidZoom(f64),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
