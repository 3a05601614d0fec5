//! Reader input descriptors
//!
//! An `Input` is either an already opened reader, the path of one file,
//! or a glob pattern. It is resolved once, at reader construction, into
//! the list of opened TIFF handles.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::errors::ReaderResult;
use crate::io::seekable::SeekableReader;
use crate::tiff::file::TiffFile;
use crate::tiff::handle::TiffHandle;

const BUFFER_LABEL: &str = "<buffer>";

/// What a reader is constructed from
pub enum Input {
    /// An open reader holding one TIFF file
    Buffer {
        reader: Box<dyn SeekableReader>,
        label: String,
    },
    /// Path to a single file
    Path(PathBuf),
    /// Glob pattern matching zero or more files
    Glob(String),
}

impl Input {
    /// Wrap an open reader
    pub fn buffer<R: SeekableReader + 'static>(reader: R) -> Self {
        Self::named_buffer(reader, BUFFER_LABEL)
    }

    /// Wrap an open reader, displaying it as `label`
    pub fn named_buffer<R: SeekableReader + 'static>(reader: R, label: &str) -> Self {
        Input::Buffer {
            reader: Box::new(reader),
            label: label.to_string(),
        }
    }

    /// Classify a string as a file path or a glob pattern
    ///
    /// A string naming an existing file is a path; anything else is
    /// treated as a glob pattern.
    pub fn classify(input: &str) -> Self {
        if Path::new(input).is_file() {
            Input::Path(PathBuf::from(input))
        } else {
            Input::Glob(input.to_string())
        }
    }

    /// Text shown when displaying a reader built from this input
    pub fn descriptor(&self) -> String {
        match self {
            Input::Buffer { label, .. } => label.clone(),
            Input::Path(path) => path.display().to_string(),
            Input::Glob(pattern) => pattern.clone(),
        }
    }

    /// Open one TIFF handle per file the input refers to
    ///
    /// A glob matching nothing resolves to an empty list. Open failures
    /// are returned unchanged.
    ///
    /// # Returns
    /// The opened handles in path order
    pub fn resolve(self) -> ReaderResult<Vec<Box<dyn TiffHandle>>> {
        match self {
            Input::Buffer { reader, label } => {
                debug!("Opening TIFF from buffer {}", label);
                let handle: Box<dyn TiffHandle> = Box::new(TiffFile::from_reader(reader, &label)?);
                Ok(vec![handle])
            }
            Input::Path(path) => {
                let handle: Box<dyn TiffHandle> = Box::new(TiffFile::open(&path)?);
                Ok(vec![handle])
            }
            Input::Glob(pattern) => {
                let mut handles: Vec<Box<dyn TiffHandle>> = Vec::new();
                for entry in glob::glob(&pattern)? {
                    let path = entry?;
                    handles.push(Box::new(TiffFile::open(&path)?));
                }

                if handles.is_empty() {
                    warn!("Glob pattern '{}' matched no files", pattern);
                } else {
                    info!("Glob pattern '{}' matched {} files", pattern, handles.len());
                }
                Ok(handles)
            }
        }
    }
}

impl From<&str> for Input {
    fn from(input: &str) -> Self {
        Input::classify(input)
    }
}

impl From<String> for Input {
    fn from(input: String) -> Self {
        Input::classify(&input)
    }
}

impl From<&Path> for Input {
    fn from(path: &Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Buffer { label, .. } => f.debug_tuple("Buffer").field(label).finish(),
            Input::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Input::Glob(pattern) => f.debug_tuple("Glob").field(pattern).finish(),
        }
    }
}
