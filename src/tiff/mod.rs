//! TIFF file access
//!
//! This module opens TIFF files through the `tiff` crate and exposes them
//! through the narrow `TiffHandle` interface used by the reader.

pub mod handle;
pub mod series;
pub mod file;

pub use file::TiffFile;
pub use handle::{lock_handle, PageInfo, SeriesInfo, SharedHandle, TiffHandle};
pub use series::group_pages;
