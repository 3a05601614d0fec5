//! Deferred arrays
//!
//! A `LazyArray` records the shape and element type of a result together
//! with the closures that produce it. Nothing is decoded until `compute` is
//! called; stacking and indexing only rearrange the graph.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::array::dtype::DataType;
use crate::array::pixel::PixelArray;
use crate::errors::{ReaderError, ReaderResult};

/// A deferred computation producing one chunk of pixel data
pub type Thunk = Arc<dyn Fn() -> ReaderResult<PixelArray> + Send + Sync>;

#[derive(Clone)]
enum Node {
    /// Leaf evaluated by calling the closure
    Delayed(Thunk),
    /// Children stacked along a new leading axis
    Stacked(Vec<LazyArray>),
}

/// Lazily evaluated n-dimensional array
#[derive(Clone)]
pub struct LazyArray {
    shape: Vec<usize>,
    dtype: DataType,
    node: Node,
}

impl LazyArray {
    /// Wrap a deferred computation as an array of known shape and type
    ///
    /// # Arguments
    /// * `compute` - Closure producing the data; not called here
    /// * `shape` - Shape the closure is expected to produce
    /// * `dtype` - Element type the closure is expected to produce
    pub fn from_delayed<F>(compute: F, shape: Vec<usize>, dtype: DataType) -> Self
    where
        F: Fn() -> ReaderResult<PixelArray> + Send + Sync + 'static,
    {
        LazyArray {
            shape,
            dtype,
            node: Node::Delayed(Arc::new(compute)),
        }
    }

    /// Stack arrays along a new leading axis
    ///
    /// All inputs must share shape and element type.
    ///
    /// # Arguments
    /// * `arrays` - Arrays to stack, in order
    ///
    /// # Returns
    /// A lazy array of rank `inputs + 1`, or an error for an empty or
    /// inconsistent input list
    pub fn stack(arrays: Vec<LazyArray>) -> ReaderResult<Self> {
        let first = arrays.first().ok_or(ReaderError::NothingToStack)?;
        let (item_shape, dtype) = (first.shape.clone(), first.dtype);

        for (i, array) in arrays.iter().enumerate() {
            if array.shape != item_shape {
                return Err(ReaderError::IncompatibleArrays(format!(
                    "array {} has shape {:?}, expected {:?}",
                    i, array.shape, item_shape
                )));
            }
            if array.dtype != dtype {
                return Err(ReaderError::IncompatibleArrays(format!(
                    "array {} has dtype {}, expected {}",
                    i, array.dtype, dtype
                )));
            }
        }

        let mut shape = Vec::with_capacity(item_shape.len() + 1);
        shape.push(arrays.len());
        shape.extend_from_slice(&item_shape);

        Ok(LazyArray {
            shape,
            dtype,
            node: Node::Stacked(arrays),
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Length of the leading axis (0 for a zero-dimensional array)
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Bytes the array occupies once computed
    pub fn nbytes(&self) -> usize {
        self.size() * self.dtype.size_in_bytes()
    }

    /// Number of deferred computations the array depends on
    pub fn num_chunks(&self) -> usize {
        match &self.node {
            Node::Delayed(_) => 1,
            Node::Stacked(children) => children.iter().map(LazyArray::num_chunks).sum(),
        }
    }

    /// Select the sub-array at `index` along the leading axis, lazily
    ///
    /// On a stacked array this returns the stacked input itself. On a
    /// leaf the selection is deferred until the leaf is computed.
    pub fn index(&self, index: usize) -> ReaderResult<Self> {
        let len = self.len();
        if self.ndim() == 0 || index >= len {
            return Err(ReaderError::IndexOutOfBounds { index, len });
        }

        match &self.node {
            Node::Stacked(children) => Ok(children[index].clone()),
            Node::Delayed(_) => {
                let parent = self.clone();
                Ok(LazyArray::from_delayed(
                    move || parent.compute()?.index_axis0(index),
                    self.shape[1..].to_vec(),
                    self.dtype,
                ))
            }
        }
    }

    /// Evaluate every deferred computation and assemble the result
    pub fn compute(&self) -> ReaderResult<PixelArray> {
        self.compute_with_progress(&mut || {})
    }

    /// Evaluate the array, calling `on_chunk` after each computed leaf
    ///
    /// # Arguments
    /// * `on_chunk` - Callback invoked once per evaluated leaf
    ///
    /// # Returns
    /// The materialized array, or the first error raised by a leaf
    pub fn compute_with_progress(&self, on_chunk: &mut dyn FnMut()) -> ReaderResult<PixelArray> {
        match &self.node {
            Node::Delayed(thunk) => {
                let result = thunk()?;
                on_chunk();

                if result.dtype() != self.dtype {
                    return Err(ReaderError::IncompatibleArrays(format!(
                        "computed dtype {} differs from declared dtype {}",
                        result.dtype(),
                        self.dtype
                    )));
                }
                if result.shape() != self.shape.as_slice() {
                    return Err(ReaderError::ShapeMismatch {
                        expected: self.shape.clone(),
                        found: result.shape().to_vec(),
                    });
                }
                Ok(result)
            }
            Node::Stacked(children) => {
                debug!("Computing stack of {} arrays with shape {:?}", children.len(), self.shape);
                let mut computed = Vec::with_capacity(children.len());
                for child in children {
                    computed.push(child.compute_with_progress(&mut *on_chunk)?);
                }
                PixelArray::stack(&computed)
            }
        }
    }
}

impl fmt::Debug for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArray")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype)
            .field("chunks", &self.num_chunks())
            .finish()
    }
}

impl fmt::Display for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        write!(
            f,
            "LazyArray<shape=({}), dtype={}, chunks={}>",
            dims.join(", "),
            self.dtype,
            self.num_chunks()
        )
    }
}
