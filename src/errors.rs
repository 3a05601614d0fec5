//! Custom error types for the TIFF stack reader

use std::fmt;
use std::io;

/// Errors raised while resolving, reading or materializing a TIFF stack
#[derive(Debug)]
pub enum ReaderError {
    /// The reader was closed and can no longer be read
    Closed(String),
    /// A file does not expose exactly one image series
    UnsupportedInput(String),
    /// A stack was requested over zero arrays
    NothingToStack,
    /// Arrays that cannot be stacked together
    IncompatibleArrays(String),
    /// A deferred computation produced data that disagrees with its declaration
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// Index past the end of the leading axis
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    /// Sample layout without a matching element type
    UnsupportedDataType(String),
    /// I/O error
    IoError(io::Error),
    /// Error reported by the TIFF decoder
    Tiff(tiff::TiffError),
    /// Invalid glob pattern or unreadable glob match
    Glob(String),
    /// Error reported by ndarray while shaping or stacking data
    Shape(ndarray::ShapeError),
    /// Error reported by the image encoder
    Image(image::ImageError),
    /// Invalid configuration
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::Closed(msg) => write!(f, "{}", msg),
            ReaderError::UnsupportedInput(msg) => write!(f, "Unsupported input: {}", msg),
            ReaderError::NothingToStack => write!(f, "Need at least one array to stack"),
            ReaderError::IncompatibleArrays(msg) => write!(f, "Incompatible arrays: {}", msg),
            ReaderError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {:?}, found {:?}", expected, found)
            }
            ReaderError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} is out of bounds for axis of length {}", index, len)
            }
            ReaderError::UnsupportedDataType(msg) => write!(f, "Unsupported data type: {}", msg),
            ReaderError::IoError(e) => write!(f, "I/O error: {}", e),
            ReaderError::Tiff(e) => write!(f, "TIFF error: {}", e),
            ReaderError::Glob(msg) => write!(f, "Glob error: {}", msg),
            ReaderError::Shape(e) => write!(f, "Array shape error: {}", e),
            ReaderError::Image(e) => write!(f, "Image error: {}", e),
            ReaderError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ReaderError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::IoError(e) => Some(e),
            ReaderError::Tiff(e) => Some(e),
            ReaderError::Shape(e) => Some(e),
            ReaderError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReaderError {
    fn from(error: io::Error) -> Self {
        ReaderError::IoError(error)
    }
}

impl From<tiff::TiffError> for ReaderError {
    fn from(error: tiff::TiffError) -> Self {
        ReaderError::Tiff(error)
    }
}

impl From<glob::PatternError> for ReaderError {
    fn from(error: glob::PatternError) -> Self {
        ReaderError::Glob(error.to_string())
    }
}

impl From<glob::GlobError> for ReaderError {
    fn from(error: glob::GlobError) -> Self {
        ReaderError::Glob(error.to_string())
    }
}

impl From<ndarray::ShapeError> for ReaderError {
    fn from(error: ndarray::ShapeError) -> Self {
        ReaderError::Shape(error)
    }
}

impl From<image::ImageError> for ReaderError {
    fn from(error: image::ImageError) -> Self {
        ReaderError::Image(error)
    }
}

impl From<String> for ReaderError {
    fn from(msg: String) -> Self {
        ReaderError::GenericError(msg)
    }
}

/// Result type for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;
