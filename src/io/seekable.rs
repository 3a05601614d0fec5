//! Seekable reader trait
//!
//! Buffer inputs and opened files both reach the TIFF decoder through
//! this trait, so the decoder can be stored behind a single boxed type.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
///
/// `Send + Sync` lets an opened handle be shared with the deferred
/// computations that decode its pages.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
