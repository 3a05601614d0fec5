//! Tests for materialized pixel arrays

use ndarray::{ArrayD, IxDyn};
use tiff::decoder::DecodingResult;

use crate::array::dtype::DataType;
use crate::array::pixel::PixelArray;
use crate::errors::ReaderError;

#[test]
fn test_from_decoding_result() {
    let array = PixelArray::from_decoding_result(DecodingResult::U16(vec![1, 2, 3, 4, 5, 6]), &[2, 3]).unwrap();
    assert_eq!(array.dtype(), DataType::UInt16);
    assert_eq!(array.shape(), &[2, 3]);
    assert_eq!(array.to_f64_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_from_decoding_result_wrong_length() {
    let result = PixelArray::from_decoding_result(DecodingResult::U8(vec![0; 5]), &[2, 3]);
    assert!(matches!(result, Err(ReaderError::Shape(_))));
}

#[test]
fn test_stack_adds_leading_axis() {
    let a = PixelArray::Int16(ArrayD::from_elem(IxDyn(&[2, 2]), 1));
    let b = PixelArray::Int16(ArrayD::from_elem(IxDyn(&[2, 2]), -2));
    let stacked = PixelArray::stack(&[a, b]).unwrap();

    assert_eq!(stacked.shape(), &[2, 2, 2]);
    assert_eq!(stacked.to_f64_vec(), vec![1.0, 1.0, 1.0, 1.0, -2.0, -2.0, -2.0, -2.0]);
}

#[test]
fn test_stack_rejects_mixed_types() {
    let a = PixelArray::UInt8(ArrayD::zeros(IxDyn(&[2])));
    let b = PixelArray::Float32(ArrayD::zeros(IxDyn(&[2])));
    assert!(matches!(PixelArray::stack(&[a, b]), Err(ReaderError::IncompatibleArrays(_))));
}

#[test]
fn test_stack_rejects_mixed_shapes() {
    let a = PixelArray::UInt8(ArrayD::zeros(IxDyn(&[2])));
    let b = PixelArray::UInt8(ArrayD::zeros(IxDyn(&[3])));
    assert!(matches!(PixelArray::stack(&[a, b]), Err(ReaderError::Shape(_))));
}

#[test]
fn test_stack_nothing() {
    assert!(matches!(PixelArray::stack(&[]), Err(ReaderError::NothingToStack)));
}

#[test]
fn test_index_axis0() {
    let array = PixelArray::UInt8(ArrayD::from_shape_vec(IxDyn(&[3, 2]), vec![0, 1, 2, 3, 4, 5]).unwrap());
    let row = array.index_axis0(1).unwrap();
    assert_eq!(row.shape(), &[2]);
    assert_eq!(row.to_f64_vec(), vec![2.0, 3.0]);

    assert!(matches!(
        array.index_axis0(3),
        Err(ReaderError::IndexOutOfBounds { index: 3, len: 3 })
    ));
}

#[test]
fn test_to_le_bytes() {
    let array = PixelArray::UInt32(ArrayD::from_shape_vec(IxDyn(&[2]), vec![1, 256]).unwrap());
    assert_eq!(array.to_le_bytes(), vec![1, 0, 0, 0, 0, 1, 0, 0]);
}
