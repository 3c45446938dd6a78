use std::num::NonZeroUsize;
use std::ops::Range;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{MlErr, Result};

/// An in-memory tabular dataset for regression.
///
/// Rows are stored contiguously as `x_size` feature values followed by one
/// target value, so the whole table is a single `(len, x_size + 1)` matrix.
/// The feature matrix `X` and target vector `y` are exposed as `ndarray`
/// views over that buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data: Vec<f32>,
    x_size: usize,
}

impl Dataset {
    /// Creates a new `Dataset` from a flat row-major table.
    ///
    /// # Arguments
    /// * `data` - The table values, `x_size` features then one target per row.
    /// * `x_size` - The number of feature columns.
    ///
    /// # Errors
    /// `InvalidInput` if `x_size` is zero, `RaggedTable` if `data` does not
    /// divide into rows of width `x_size + 1`.
    pub fn new(data: Vec<f32>, x_size: usize) -> Result<Self> {
        if x_size == 0 {
            return Err(MlErr::InvalidInput(
                "a dataset needs at least one feature column",
            ));
        }

        let row_width = x_size + 1;
        if data.len() % row_width != 0 {
            return Err(MlErr::RaggedTable {
                len: data.len(),
                row_width,
            });
        }

        Ok(Self { data, x_size })
    }

    /// Creates a new `Dataset` from a feature matrix and a target vector.
    ///
    /// # Errors
    /// `ShapeMismatch` if `x` and `y` disagree on the number of samples,
    /// `InvalidInput` if `x` has no columns.
    pub fn from_parts(x: Array2<f32>, y: Array1<f32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::ShapeMismatch {
                a: "features",
                b: "targets",
                got: x.nrows(),
                expected: y.len(),
            });
        }
        if x.ncols() == 0 {
            return Err(MlErr::InvalidInput(
                "a dataset needs at least one feature column",
            ));
        }

        let x_size = x.ncols();
        let mut data = Vec::with_capacity(x.nrows() * (x_size + 1));
        for (row, target) in x.rows().into_iter().zip(&y) {
            data.extend(row.iter().copied());
            data.push(*target);
        }

        Ok(Self { data, x_size })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len() / self.row_width()
    }

    /// Checks whether the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of feature columns.
    pub fn n_features(&self) -> usize {
        self.x_size
    }

    /// Returns the `(len, n_features)` feature matrix.
    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.rows(0..self.len()).0
    }

    /// Returns the length-`len` target vector.
    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.rows(0..self.len()).1
    }

    /// Permutes the rows in place.
    ///
    /// # Arguments
    /// * `rng` - A random number generator; a seeded one makes the
    ///   permutation reproducible.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        let width = self.row_width();
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);

        let mut shuffled = Vec::with_capacity(self.data.len());
        for row in order {
            shuffled.extend_from_slice(&self.data[row * width..(row + 1) * width]);
        }
        self.data = shuffled;
    }

    /// Splits the dataset into two complementary parts.
    ///
    /// The first part gets the leading `round(len * ratio)` rows, the second
    /// the rest: together they cover every row exactly once. Row order is
    /// preserved, so shuffle first for a random split.
    ///
    /// # Errors
    /// `BadSplitRatio` if either side would end up empty.
    pub fn split(&self, ratio: f32) -> Result<(Self, Self)> {
        let len = self.len();
        let head_len = (len as f32 * ratio).round() as usize;
        if !(0.0..=1.0).contains(&ratio) || head_len == 0 || head_len >= len {
            return Err(MlErr::BadSplitRatio { ratio, len });
        }

        let (head, tail) = self.data.split_at(head_len * self.row_width());
        Ok((
            Self {
                data: head.to_vec(),
                x_size: self.x_size,
            },
            Self {
                data: tail.to_vec(),
                x_size: self.x_size,
            },
        ))
    }

    /// Returns an iterator over contiguous `(X, y)` batches.
    ///
    /// Every sample appears in exactly one batch; the last batch may hold
    /// fewer than `batch_size` rows.
    pub fn batches(&self, batch_size: NonZeroUsize) -> Batches<'_> {
        Batches {
            dataset: self,
            batch_size: batch_size.get(),
            current: 0,
        }
    }

    fn row_width(&self) -> usize {
        self.x_size + 1
    }

    fn rows(&self, range: Range<usize>) -> (ArrayView2<'_, f32>, ArrayView1<'_, f32>) {
        let table = ArrayView2::from_shape((self.len(), self.row_width()), &self.data).unwrap();
        let window = table.slice_move(s![range, ..]);
        let (x, y) = window.split_at(Axis(1), self.x_size);

        (x, y.index_axis_move(Axis(1), 0))
    }
}

/// Iterator over the contiguous batches of a [`Dataset`].
pub struct Batches<'a> {
    dataset: &'a Dataset,
    batch_size: usize,
    current: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = (ArrayView2<'a, f32>, ArrayView1<'a, f32>);

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len();
        if self.current >= total {
            return None;
        }

        let end = (self.current + self.batch_size).min(total);
        let batch = self.dataset.rows(self.current..end);
        self.current = end;

        Some(batch)
    }
}
