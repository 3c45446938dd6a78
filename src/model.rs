use ndarray::{Array1, ArrayView1, ArrayView2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;

use crate::loss::{LossFn, Mse};

/// A linear regression estimator: `ŷ = X·w + b`.
///
/// Holds one weight per feature plus a scalar bias; fitting mutates both in
/// place through the trainer's optimizer.
pub struct LinearRegression {
    weights: Array1<f32>,
    bias: f32,
}

impl LinearRegression {
    /// Creates a model with standard-normal initial parameters.
    ///
    /// # Arguments
    /// * `n_features` - The number of weights, one per feature column.
    /// * `rng` - A random number generator; a seeded one makes the
    ///   initialization reproducible.
    pub fn new(n_features: usize, rng: &mut impl Rng) -> Self {
        Self {
            weights: Array1::random_using(n_features, StandardNormal, rng),
            bias: rng.sample(StandardNormal),
        }
    }

    /// Creates a model with all parameters at zero.
    pub fn zeroed(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    /// Returns the number of features the model was built for.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Returns the weight vector.
    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    /// Returns the bias.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Predicts one value per input row: `X·w + b`.
    ///
    /// Shapes are checked where the arithmetic happens: a column count that
    /// does not match the weight length panics in the underlying dot product.
    pub fn predict(&self, x: ArrayView2<f32>) -> Array1<f32> {
        x.dot(&self.weights) + self.bias
    }

    /// Gradients of the batch loss with respect to the parameters.
    ///
    /// # Arguments
    /// * `x` - The batch's feature matrix.
    /// * `d` - The loss gradient with respect to the predictions.
    ///
    /// # Returns
    /// The weight gradient `Xᵀ·d` and the bias gradient `Σd`.
    pub fn backward(&self, x: ArrayView2<f32>, d: ArrayView1<f32>) -> (Array1<f32>, f32) {
        (x.t().dot(&d), d.sum())
    }

    /// Coefficient of determination: `1 - MSE / Var(y)`.
    ///
    /// `Var` is the population variance of the targets. A constant target
    /// vector has zero variance and the division yields a non-finite score.
    pub fn score(&self, x: ArrayView2<f32>, y: ArrayView1<f32>) -> f32 {
        let mse = Mse.loss(self.predict(x).view(), y);
        let y_mean = y.mean().unwrap_or_default();
        let var = y.mapv(|v| (v - y_mean).powi(2)).mean().unwrap_or_default();

        1.0 - mse / var
    }

    /// L1 norm of the weight vector.
    pub fn l1_norm(&self) -> f32 {
        self.weights.mapv(f32::abs).sum()
    }

    pub(crate) fn params_mut(&mut self) -> (&mut Array1<f32>, &mut f32) {
        (&mut self.weights, &mut self.bias)
    }
}
