//! Materialized pixel data
//!
//! A `PixelArray` is an `ndarray::ArrayD` tagged with its element type, the
//! form in which decoded pages and computed lazy arrays are handed back.

use ndarray::{ArrayD, Axis, IxDyn};
use tiff::decoder::DecodingResult;

use crate::array::dtype::DataType;
use crate::errors::{ReaderError, ReaderResult};

/// Decoded pixel data with its element type
#[derive(Debug, Clone, PartialEq)]
pub enum PixelArray {
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

/// Evaluate an expression against the inner `ArrayD` of any variant
macro_rules! dispatch_pixel_array {
    ($value:expr, $array:ident => $body:expr) => {
        match $value {
            $crate::array::pixel::PixelArray::UInt8($array) => $body,
            $crate::array::pixel::PixelArray::UInt16($array) => $body,
            $crate::array::pixel::PixelArray::UInt32($array) => $body,
            $crate::array::pixel::PixelArray::UInt64($array) => $body,
            $crate::array::pixel::PixelArray::Int8($array) => $body,
            $crate::array::pixel::PixelArray::Int16($array) => $body,
            $crate::array::pixel::PixelArray::Int32($array) => $body,
            $crate::array::pixel::PixelArray::Int64($array) => $body,
            $crate::array::pixel::PixelArray::Float32($array) => $body,
            $crate::array::pixel::PixelArray::Float64($array) => $body,
        }
    };
}

pub(crate) use dispatch_pixel_array;

/// Build a new array of the same variant from the inner `ArrayD`
macro_rules! map_pixel_array {
    ($value:expr, $array:ident => $body:expr) => {
        match $value {
            PixelArray::UInt8($array) => PixelArray::UInt8($body),
            PixelArray::UInt16($array) => PixelArray::UInt16($body),
            PixelArray::UInt32($array) => PixelArray::UInt32($body),
            PixelArray::UInt64($array) => PixelArray::UInt64($body),
            PixelArray::Int8($array) => PixelArray::Int8($body),
            PixelArray::Int16($array) => PixelArray::Int16($body),
            PixelArray::Int32($array) => PixelArray::Int32($body),
            PixelArray::Int64($array) => PixelArray::Int64($body),
            PixelArray::Float32($array) => PixelArray::Float32($body),
            PixelArray::Float64($array) => PixelArray::Float64($body),
        }
    };
}

/// Stack every array of one variant, rejecting any array of another variant
macro_rules! stack_variant {
    ($variant:ident, $arrays:expr) => {{
        let views = $arrays
            .iter()
            .map(|array| match array {
                PixelArray::$variant(inner) => Ok(inner.view()),
                other => Err(ReaderError::IncompatibleArrays(format!(
                    "cannot stack {} with {}",
                    other.dtype(),
                    $arrays[0].dtype()
                ))),
            })
            .collect::<ReaderResult<Vec<_>>>()?;
        PixelArray::$variant(ndarray::stack(Axis(0), &views)?)
    }};
}

impl PixelArray {
    /// Shape decoder output into an array
    ///
    /// # Arguments
    /// * `result` - Flat samples returned by the TIFF decoder
    /// * `shape` - Declared shape of the page
    ///
    /// # Returns
    /// The shaped array, or a shape error when the sample count disagrees
    pub fn from_decoding_result(result: DecodingResult, shape: &[usize]) -> ReaderResult<Self> {
        let dim = IxDyn(shape);
        let array = match result {
            DecodingResult::U8(data) => PixelArray::UInt8(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::U16(data) => PixelArray::UInt16(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::U32(data) => PixelArray::UInt32(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::U64(data) => PixelArray::UInt64(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::I8(data) => PixelArray::Int8(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::I16(data) => PixelArray::Int16(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::I32(data) => PixelArray::Int32(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::I64(data) => PixelArray::Int64(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::F32(data) => PixelArray::Float32(ArrayD::from_shape_vec(dim, data)?),
            DecodingResult::F64(data) => PixelArray::Float64(ArrayD::from_shape_vec(dim, data)?),
        };
        Ok(array)
    }

    /// Element type of the array
    pub fn dtype(&self) -> DataType {
        match self {
            PixelArray::UInt8(_) => DataType::UInt8,
            PixelArray::UInt16(_) => DataType::UInt16,
            PixelArray::UInt32(_) => DataType::UInt32,
            PixelArray::UInt64(_) => DataType::UInt64,
            PixelArray::Int8(_) => DataType::Int8,
            PixelArray::Int16(_) => DataType::Int16,
            PixelArray::Int32(_) => DataType::Int32,
            PixelArray::Int64(_) => DataType::Int64,
            PixelArray::Float32(_) => DataType::Float32,
            PixelArray::Float64(_) => DataType::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        dispatch_pixel_array!(self, array => array.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        dispatch_pixel_array!(self, array => array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out the sub-array at `index` along the leading axis
    pub fn index_axis0(&self, index: usize) -> ReaderResult<Self> {
        let len = self.shape().first().copied().unwrap_or(0);
        if index >= len {
            return Err(ReaderError::IndexOutOfBounds { index, len });
        }
        Ok(map_pixel_array!(self, array => array.index_axis(Axis(0), index).to_owned()))
    }

    /// Stack arrays of equal shape and type along a new leading axis
    ///
    /// # Arguments
    /// * `arrays` - Arrays to stack, in order
    ///
    /// # Returns
    /// An array with one more dimension than its inputs
    pub fn stack(arrays: &[PixelArray]) -> ReaderResult<Self> {
        let first = arrays.first().ok_or(ReaderError::NothingToStack)?;
        let stacked = match first {
            PixelArray::UInt8(_) => stack_variant!(UInt8, arrays),
            PixelArray::UInt16(_) => stack_variant!(UInt16, arrays),
            PixelArray::UInt32(_) => stack_variant!(UInt32, arrays),
            PixelArray::UInt64(_) => stack_variant!(UInt64, arrays),
            PixelArray::Int8(_) => stack_variant!(Int8, arrays),
            PixelArray::Int16(_) => stack_variant!(Int16, arrays),
            PixelArray::Int32(_) => stack_variant!(Int32, arrays),
            PixelArray::Int64(_) => stack_variant!(Int64, arrays),
            PixelArray::Float32(_) => stack_variant!(Float32, arrays),
            PixelArray::Float64(_) => stack_variant!(Float64, arrays),
        };
        Ok(stacked)
    }

    /// Elements in logical (row-major) order as little-endian bytes
    pub fn to_le_bytes(&self) -> Vec<u8> {
        dispatch_pixel_array!(self, array => array.iter().flat_map(|v| v.to_le_bytes()).collect())
    }

    /// Elements in logical order converted to `f64`
    ///
    /// 64-bit integers above 2^53 lose precision.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch_pixel_array!(self, array => array.iter().map(|&v| v as f64).collect())
    }
}
