//! Element types of decoded TIFF samples

use std::fmt;

use crate::errors::{ReaderError, ReaderResult};

/// TIFF SampleFormat codes
pub mod sample_format {
    pub const UINT: u16 = 1;
    pub const INT: u16 = 2;
    pub const IEEEFP: u16 = 3;
    pub const VOID: u16 = 4;
}

/// Element type of a page, a series or a lazy array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl DataType {
    /// Derive the element type from the BitsPerSample and SampleFormat tags
    ///
    /// An undefined (void) sample format is read as unsigned, which is what
    /// the decoder produces for it.
    ///
    /// # Arguments
    /// * `bits_per_sample` - Value of the BitsPerSample tag
    /// * `format` - Value of the SampleFormat tag (1 when the tag is absent)
    ///
    /// # Returns
    /// The matching DataType, or an error for layouts without one
    pub fn from_tiff_format(bits_per_sample: u16, format: u16) -> ReaderResult<Self> {
        let dtype = match (format, bits_per_sample) {
            (sample_format::UINT | sample_format::VOID, 8) => DataType::UInt8,
            (sample_format::UINT | sample_format::VOID, 16) => DataType::UInt16,
            (sample_format::UINT | sample_format::VOID, 32) => DataType::UInt32,
            (sample_format::UINT | sample_format::VOID, 64) => DataType::UInt64,
            (sample_format::INT, 8) => DataType::Int8,
            (sample_format::INT, 16) => DataType::Int16,
            (sample_format::INT, 32) => DataType::Int32,
            (sample_format::INT, 64) => DataType::Int64,
            (sample_format::IEEEFP, 32) => DataType::Float32,
            (sample_format::IEEEFP, 64) => DataType::Float64,
            _ => {
                return Err(ReaderError::UnsupportedDataType(format!(
                    "{} bits per sample with sample format {}",
                    bits_per_sample, format
                )))
            }
        };
        Ok(dtype)
    }

    /// Size of one element in bytes
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DataType::UInt8 | DataType::Int8 => 1,
            DataType::UInt16 | DataType::Int16 => 2,
            DataType::UInt32 | DataType::Int32 | DataType::Float32 => 4,
            DataType::UInt64 | DataType::Int64 | DataType::Float64 => 8,
        }
    }

    /// NumPy-style name of the type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
        }
    }

    /// Little-endian type descriptor used in NPY headers
    pub fn npy_descr(&self) -> &'static str {
        match self {
            DataType::UInt8 => "|u1",
            DataType::UInt16 => "<u2",
            DataType::UInt32 => "<u4",
            DataType::UInt64 => "<u8",
            DataType::Int8 => "|i1",
            DataType::Int16 => "<i2",
            DataType::Int32 => "<i4",
            DataType::Int64 => "<i8",
            DataType::Float32 => "<f4",
            DataType::Float64 => "<f8",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
