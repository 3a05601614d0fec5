//! Narrow interface to an opened TIFF file
//!
//! The reader only needs three things from a TIFF library: the logical
//! series of a file, the decoded pixels of one page, and a way to release
//! the file. `TiffHandle` captures exactly that, so the reader can run
//! against the `tiff` crate or against an in-memory fake.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::array::dtype::DataType;
use crate::array::pixel::PixelArray;
use crate::errors::{ReaderError, ReaderResult};

/// Layout of one page (IFD) of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Index of the page's IFD within the file
    pub index: usize,
    /// `[height, width]`, or `[height, width, samples]` for multi-sample pages
    pub shape: Vec<usize>,
    /// Element type of the page's samples
    pub dtype: DataType,
}

/// A logical image series: pages sharing one shape and element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    /// Shape of every page in the series
    pub shape: Vec<usize>,
    /// Element type of every page in the series
    pub dtype: DataType,
    /// IFD indices of the pages, in file order
    pub pages: Vec<usize>,
}

impl SeriesInfo {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// An opened TIFF file
pub trait TiffHandle: Send {
    /// Name used in log and error messages
    fn name(&self) -> &str;

    /// The logical image series of the file
    fn series(&mut self) -> ReaderResult<Vec<SeriesInfo>>;

    /// Decode the page whose IFD index is `page`
    fn decode_page(&mut self, page: usize) -> ReaderResult<PixelArray>;

    /// Release the file; releasing twice is a no-op
    fn close(&mut self) -> ReaderResult<()>;
}

/// Handle shared between a reader and the deferred computations it builds
pub type SharedHandle = Arc<Mutex<Box<dyn TiffHandle>>>;

/// Lock a shared handle, reporting a poisoned lock as an error
pub fn lock_handle(handle: &SharedHandle) -> ReaderResult<MutexGuard<'_, Box<dyn TiffHandle>>> {
    handle
        .lock()
        .map_err(|_| ReaderError::GenericError("TIFF handle lock was poisoned".to_string()))
}
