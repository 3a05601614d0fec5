//! Input handling
//!
//! This module provides the seekable reader abstraction and the input
//! descriptor that is resolved into opened TIFF handles.

pub mod seekable;
pub mod input;

pub use input::Input;
pub use seekable::SeekableReader;
