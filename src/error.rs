use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be between {1} and {2}")]
    InvalidQuality(u8, u8, u8),

    #[error("Invalid target size: {0}. Must be between {1} and {2}")]
    InvalidTargetSize(u32, u32, u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No input files found in: {0}")]
    NoInputFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive entry {path:?} lies outside {base:?}")]
    ArchiveEntryOutsideRoot { path: PathBuf, base: PathBuf },

    #[error("Document rendering failed: {0}")]
    DocumentRendering(String),

    #[error("PDF renderer unavailable: {0}")]
    RasterizerUnavailable(String),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
