//! Lazy and materialized arrays
//!
//! This module provides the deferred array built by the reader, the
//! dtype-tagged arrays it materializes into, and helpers to write those
//! arrays out as files or images.

pub mod dtype;
pub mod pixel;
pub mod lazy;
pub mod export;
pub mod render;
#[cfg(test)]
mod tests;

pub use dtype::DataType;
pub use pixel::PixelArray;
pub use lazy::{LazyArray, Thunk};
pub use export::{save_array, ArrayFormat};
pub use render::to_dynamic_image;
