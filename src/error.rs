use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("No image files found in directory: {0}")]
    EmptyDirectory(PathBuf),

    #[error("Invalid crop dimensions: {0:?}. Expected \"<width> <height>\" with two positive integers")]
    InvalidDimensions(String),

    #[error("Invalid quality value: {0:?}. Expected an integer")]
    InvalidQuality(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to transcode {path}: {reason}")]
    Transcode { path: PathBuf, reason: String },

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
