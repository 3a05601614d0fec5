//! Tests for deferred arrays

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};

use crate::array::dtype::DataType;
use crate::array::lazy::LazyArray;
use crate::array::pixel::PixelArray;
use crate::errors::ReaderError;

/// A 2x3 uint8 leaf filled with `value`, counting its evaluations
fn counted_leaf(value: u8, calls: &Arc<AtomicUsize>) -> LazyArray {
    let calls = Arc::clone(calls);
    LazyArray::from_delayed(
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(PixelArray::UInt8(ArrayD::from_elem(IxDyn(&[2, 3]), value)))
        },
        vec![2, 3],
        DataType::UInt8,
    )
}

#[test]
fn test_from_delayed_is_lazy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let leaf = counted_leaf(7, &calls);

    assert_eq!(leaf.shape(), &[2, 3]);
    assert_eq!(leaf.dtype(), DataType::UInt8);
    assert_eq!(leaf.nbytes(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let computed = leaf.compute().unwrap();
    assert_eq!(computed.to_f64_vec(), vec![7.0; 6]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stack_shape_and_values() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stacked = LazyArray::stack(vec![counted_leaf(1, &calls), counted_leaf(2, &calls), counted_leaf(3, &calls)]).unwrap();

    assert_eq!(stacked.shape(), &[3, 2, 3]);
    assert_eq!(stacked.ndim(), 3);
    assert_eq!(stacked.len(), 3);
    assert_eq!(stacked.num_chunks(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let computed = stacked.compute().unwrap();
    assert_eq!(computed.shape(), &[3, 2, 3]);
    let values = computed.to_f64_vec();
    assert_eq!(&values[..6], &[1.0; 6]);
    assert_eq!(&values[12..], &[3.0; 6]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_stack_empty_fails() {
    assert!(matches!(LazyArray::stack(Vec::new()), Err(ReaderError::NothingToStack)));
}

#[test]
fn test_stack_rejects_mismatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let other_shape = LazyArray::from_delayed(
        || Ok(PixelArray::UInt8(ArrayD::zeros(IxDyn(&[4])))),
        vec![4],
        DataType::UInt8,
    );
    let other_dtype = LazyArray::from_delayed(
        || Ok(PixelArray::Float32(ArrayD::zeros(IxDyn(&[2, 3])))),
        vec![2, 3],
        DataType::Float32,
    );

    assert!(matches!(
        LazyArray::stack(vec![counted_leaf(0, &calls), other_shape]),
        Err(ReaderError::IncompatibleArrays(_))
    ));
    assert!(matches!(
        LazyArray::stack(vec![counted_leaf(0, &calls), other_dtype]),
        Err(ReaderError::IncompatibleArrays(_))
    ));
}

#[test]
fn test_declared_shape_is_checked() {
    let liar = LazyArray::from_delayed(
        || Ok(PixelArray::UInt8(ArrayD::zeros(IxDyn(&[3, 3])))),
        vec![2, 3],
        DataType::UInt8,
    );
    assert!(matches!(liar.compute(), Err(ReaderError::ShapeMismatch { .. })));
}

#[test]
fn test_declared_dtype_is_checked() {
    let liar = LazyArray::from_delayed(
        || Ok(PixelArray::UInt16(ArrayD::zeros(IxDyn(&[2, 3])))),
        vec![2, 3],
        DataType::UInt8,
    );
    match liar.compute() {
        Err(ReaderError::IncompatibleArrays(msg)) => {
            assert!(msg.contains("uint16"));
            assert!(msg.contains("uint8"));
        }
        other => panic!("expected IncompatibleArrays, got {:?}", other.map(|a| a.dtype())),
    }
}

#[test]
fn test_index_stack_only_computes_selected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stacked = LazyArray::stack(vec![counted_leaf(1, &calls), counted_leaf(2, &calls)]).unwrap();

    let second = stacked.index(1).unwrap();
    assert_eq!(second.shape(), &[2, 3]);
    assert_eq!(second.compute().unwrap().to_f64_vec(), vec![2.0; 6]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(matches!(stacked.index(2), Err(ReaderError::IndexOutOfBounds { index: 2, len: 2 })));
}

#[test]
fn test_index_leaf_is_deferred() {
    let calls = Arc::new(AtomicUsize::new(0));
    let leaf = counted_leaf(5, &calls);

    let row = leaf.index(1).unwrap();
    assert_eq!(row.shape(), &[3]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(row.compute().unwrap().to_f64_vec(), vec![5.0; 3]);
}

#[test]
fn test_compute_with_progress_counts_leaves() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stacked = LazyArray::stack(vec![counted_leaf(1, &calls), counted_leaf(2, &calls)]).unwrap();

    let mut ticks = 0;
    stacked.compute_with_progress(&mut || ticks += 1).unwrap();
    assert_eq!(ticks, 2);
}

#[test]
fn test_display() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stacked = LazyArray::stack(vec![counted_leaf(1, &calls), counted_leaf(2, &calls)]).unwrap();
    assert_eq!(stacked.to_string(), "LazyArray<shape=(2, 2, 3), dtype=uint8, chunks=2>");
}
