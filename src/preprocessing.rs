use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::{MlErr, Result};

/// Per-feature standardization: `(x - mean) / std`.
///
/// Fitted on a feature matrix; constant columns keep a divisor of one so the
/// transform never produces non-finite values.
pub struct StandardScaler {
    mean: Array1<f32>,
    std: Array1<f32>,
}

impl StandardScaler {
    /// Fits a scaler on the given feature matrix.
    ///
    /// The per-feature standard deviation is the population one (ddof = 0).
    ///
    /// # Errors
    /// `EmptyDataset` if the matrix has no rows.
    pub fn fit(x: ArrayView2<f32>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(MlErr::EmptyDataset);
        }

        let mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyDataset)?;
        let std = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        Ok(Self { mean, std })
    }

    /// Returns the per-feature means seen during fit.
    pub fn mean(&self) -> &Array1<f32> {
        &self.mean
    }

    /// Returns the per-feature standard deviations seen during fit.
    pub fn std(&self) -> &Array1<f32> {
        &self.std
    }

    /// Centers and scales every column of `x`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `x` has a different column count than the matrix
    /// the scaler was fitted on.
    pub fn transform(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.mean.len() {
            return Err(MlErr::ShapeMismatch {
                a: "input features",
                b: "fitted features",
                got: x.ncols(),
                expected: self.mean.len(),
            });
        }

        Ok((&x - &self.mean) / &self.std)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_fit_computes_mean_and_std() {
        let x = arr2(&[[0.0, 1.0], [0.0, 1.0], [1.0, 3.0]]);
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let mean = scaler.mean();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_standardizes_columns() {
        let x = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]]);
        let scaler = StandardScaler::fit(x.view()).unwrap();
        let z = scaler.transform(x.view()).unwrap();

        let mean = z.mean_axis(Axis(0)).unwrap();
        let std = z.std_axis(Axis(0), 0.0);
        for j in 0..2 {
            assert!(mean[j].abs() < 1e-6, "mean[{j}] = {}", mean[j]);
            assert!((std[j] - 1.0).abs() < 1e-5, "std[{j}] = {}", std[j]);
        }
    }

    #[test]
    fn test_constant_column_stays_finite() {
        let x = arr2(&[[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]]);
        let scaler = StandardScaler::fit(x.view()).unwrap();
        let z = scaler.transform(x.view()).unwrap();

        assert!(z.iter().all(|v| v.is_finite()));
        assert!(z.column(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_rejects_feature_mismatch() {
        let x = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let wrong = arr2(&[[1.0, 2.0, 3.0]]);
        assert!(matches!(
            scaler.transform(wrong.view()),
            Err(MlErr::ShapeMismatch {
                got: 3,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_fit_rejects_empty_matrix() {
        let x = Array2::zeros((0, 2));
        assert!(matches!(
            StandardScaler::fit(x.view()),
            Err(MlErr::EmptyDataset)
        ));
    }
}
