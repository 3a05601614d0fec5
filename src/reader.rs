//! TIFF stack reader
//!
//! `TiffStackReader` resolves its input into opened TIFF files and exposes
//! the pages of their single image series as one lazy array.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::array::lazy::LazyArray;
use crate::errors::{ReaderError, ReaderResult};
use crate::io::input::Input;
use crate::tiff::handle::{lock_handle, SharedHandle, TiffHandle};

/// Content type handled by the reader
pub const MIME_TYPE: &str = "image/tiff";

/// Reader over one or more TIFF files
///
/// The reader owns its file handles until it is closed, either explicitly
/// with `close`, through `scope`, or when it is dropped.
pub struct TiffStackReader {
    /// Input the reader was built from, for display
    descriptor: String,
    /// Opened files, shared with the deferred page computations
    handles: Vec<SharedHandle>,
    /// File metadata; not extracted yet, always empty
    metadata: BTreeMap<String, String>,
    /// Whether `close` has been called
    closed: bool,
}

impl TiffStackReader {
    /// Open a reader over a buffer, a file path or a glob pattern
    ///
    /// Every file is opened eagerly. A glob matching no files yields a
    /// reader without files; failures to open a file are returned as is.
    ///
    /// # Arguments
    /// * `input` - Anything convertible to an `Input`; strings are
    ///   classified as a path when they name an existing file, and as a
    ///   glob pattern otherwise
    ///
    /// # Returns
    /// The opened reader or the first error raised while opening files
    pub fn open<I: Into<Input>>(input: I) -> ReaderResult<Self> {
        let input = input.into();
        let descriptor = input.descriptor();
        info!("Opening TIFF stack from {:?}", input);

        let handles = input.resolve()?;
        Ok(Self::from_handles(&descriptor, handles))
    }

    /// Build a reader over already opened handles
    ///
    /// # Arguments
    /// * `descriptor` - Text shown when displaying the reader
    /// * `handles` - Opened files, in stacking order
    pub fn from_handles(descriptor: &str, handles: Vec<Box<dyn TiffHandle>>) -> Self {
        TiffStackReader {
            descriptor: descriptor.to_string(),
            handles: handles.into_iter().map(|h| Arc::new(Mutex::new(h))).collect(),
            metadata: BTreeMap::new(),
            closed: false,
        }
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Number of files the input resolved to
    pub fn file_count(&self) -> usize {
        self.handles.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Expose every page as one lazy array
    ///
    /// Pages are ordered by file, then by position within the file's
    /// series. A single page is returned as is; several pages are stacked
    /// along a new leading axis. No pixel data is decoded here.
    ///
    /// # Returns
    /// The combined lazy array, or an error when the reader is closed, a
    /// file does not have exactly one series, or there are no pages
    pub fn read(&self) -> ReaderResult<LazyArray> {
        if self.closed {
            return Err(ReaderError::Closed(format!("{} is closed and can no longer be read.", self)));
        }

        let mut stack = Vec::new();
        for handle in &self.handles {
            let (name, mut series) = {
                let mut guard = lock_handle(handle)?;
                let series = guard.series()?;
                (guard.name().to_string(), series)
            };

            if series.len() != 1 {
                return Err(ReaderError::UnsupportedInput(format!(
                    "{} contains {} image series, expected exactly one",
                    name,
                    series.len()
                )));
            }
            let series = series.remove(0);
            debug!("{}: {} pages of shape {:?} ({})", name, series.len(), series.shape, series.dtype);

            for &page in &series.pages {
                let handle = Arc::clone(handle);
                stack.push(LazyArray::from_delayed(
                    move || lock_handle(&handle)?.decode_page(page),
                    series.shape.clone(),
                    series.dtype,
                ));
            }
        }

        info!("Read {} pages from {} files", stack.len(), self.handles.len());

        if stack.len() == 1 {
            Ok(stack.remove(0))
        } else {
            LazyArray::stack(stack)
        }
    }

    /// Close the reader and release every file
    ///
    /// All handles are released even when one of them fails; the first
    /// failure is returned. Closing again releases nothing new.
    pub fn close(&mut self) -> ReaderResult<()> {
        self.closed = true;

        let mut first_error = None;
        for handle in &self.handles {
            if let Err(e) = lock_handle(handle).and_then(|mut guard| guard.close()) {
                warn!("Failed to release a file of {}: {}", self, e);
                first_error.get_or_insert(e);
            }
        }

        info!("Closed {}", self);
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run `f` with the reader, then close it
    ///
    /// The reader is closed whether `f` succeeds, fails or panics. An error
    /// from `f` takes precedence over an error from closing.
    pub fn scope<T, F>(mut self, f: F) -> ReaderResult<T>
    where
        F: FnOnce(&mut Self) -> ReaderResult<T>,
    {
        let result = f(&mut self);
        let closed = self.close();
        let value = result?;
        closed?;
        Ok(value)
    }
}

impl fmt::Display for TiffStackReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TiffStackReader({:?})", self.descriptor)
    }
}

impl fmt::Debug for TiffStackReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiffStackReader")
            .field("descriptor", &self.descriptor)
            .field("files", &self.handles.len())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Drop for TiffStackReader {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.close() {
                warn!("Error while closing {} on drop: {}", self, e);
            }
        }
    }
}
