pub mod errors;
pub mod io;
pub mod tiff;
pub mod array;
pub mod reader;
pub mod config;
pub mod utils;
pub mod commands;

pub use crate::reader::{TiffStackReader, MIME_TYPE};

pub use crate::array::{DataType, LazyArray, PixelArray};
pub use crate::errors::{ReaderError, ReaderResult};
pub use crate::io::Input;
pub use crate::tiff::{TiffFile, TiffHandle};
