use std::num::NonZeroUsize;

use log::debug;
use rand::Rng;

use crate::{
    MlErr, Result, dataset::Dataset, loss::LossFn, model::LinearRegression,
    optimization::Optimizer,
};

const DEFAULT_EPOCHS: usize = 10;
const DEFAULT_BATCH_SIZE: usize = 16;

/// Runs the epoch-by-epoch gradient descent loop for a [`LinearRegression`].
///
/// Combines an optimizer, a loss function and a random number generator; the
/// dataset and the model are passed explicitly into [`Trainer::fit`].
pub struct Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    optimizer: O,
    loss_fn: L,
    rng: R,

    epochs: usize,
    batch_size: NonZeroUsize,
    shuffle: bool,
}

impl<O, L, R> Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `Trainer` with the default epoch count (10), batch size
    /// (16) and per-epoch row shuffling enabled.
    ///
    /// # Arguments
    /// * `optimizer` - The parameter update rule.
    /// * `loss_fn` - The loss to minimize.
    /// * `rng` - A random number generator driving the shuffling; a seeded
    ///   one makes the whole weight trajectory reproducible.
    pub fn new(optimizer: O, loss_fn: L, rng: R) -> Self {
        Self {
            optimizer,
            loss_fn,
            rng,
            epochs: DEFAULT_EPOCHS,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap(),
            shuffle: true,
        }
    }

    /// Sets the number of passes over the dataset.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the number of rows per gradient update.
    pub fn batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enables or disables per-epoch row shuffling.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fits the model on the dataset.
    ///
    /// For every epoch, iterates the dataset's batches, computes predictions
    /// and the batch loss, then applies one optimizer update per batch.
    ///
    /// # Returns
    /// The per-batch and per-epoch loss history.
    ///
    /// # Errors
    /// `EmptyDataset` if the dataset has no rows, `ShapeMismatch` if the
    /// model's weight count differs from the dataset's feature count.
    pub fn fit(&mut self, model: &mut LinearRegression, dataset: &Dataset) -> Result<TrainReport> {
        if dataset.is_empty() {
            return Err(MlErr::EmptyDataset);
        }
        if model.n_features() != dataset.n_features() {
            return Err(MlErr::ShapeMismatch {
                a: "model weights",
                b: "dataset features",
                got: model.n_features(),
                expected: dataset.n_features(),
            });
        }

        let mut rows = dataset.clone();
        let mut batch_losses = Vec::new();
        let mut epoch_losses = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            if self.shuffle {
                rows.shuffle(&mut self.rng);
            }

            let mut total_loss = 0.0;
            let mut num_batches = 0;

            for (x, y) in rows.batches(self.batch_size) {
                let y_pred = model.predict(x);
                let loss = self.loss_fn.loss(y_pred.view(), y);
                let d = self.loss_fn.loss_prime(y_pred.view(), y);
                let (grad_w, grad_b) = model.backward(x, d.view());

                let (weights, bias) = model.params_mut();
                self.optimizer.update_params(weights, bias, &grad_w, grad_b);

                batch_losses.push(loss);
                total_loss += loss;
                num_batches += 1;
            }

            let epoch_loss = total_loss / num_batches as f32;
            debug!("epoch {epoch}: loss = {epoch_loss}");
            epoch_losses.push(epoch_loss);
        }

        Ok(TrainReport {
            batch_losses,
            epoch_losses,
        })
    }
}

/// Loss history produced by a [`Trainer::fit`] run.
///
/// Fields are kept private to allow evolving the recorded series without
/// breaking the public API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainReport {
    batch_losses: Vec<f32>,
    epoch_losses: Vec<f32>,
}

impl TrainReport {
    /// Returns the loss of every gradient update, in order.
    pub fn batch_losses(&self) -> &[f32] {
        &self.batch_losses
    }

    /// Returns the mean batch loss of every epoch, in order.
    pub fn epoch_losses(&self) -> &[f32] {
        &self.epoch_losses
    }

    /// Returns the mean loss of the last epoch, if any epoch ran.
    pub fn final_loss(&self) -> Option<f32> {
        self.epoch_losses.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::Mse;
    use crate::optimization::GradientDescent;
    use ndarray::{arr1, arr2};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // y = 2x + 1 over four points.
    fn line_dataset() -> Dataset {
        let x = arr2(&[[0.0], [1.0], [2.0], [3.0]]);
        let y = arr1(&[1.0, 3.0, 5.0, 7.0]);
        Dataset::from_parts(x, y).unwrap()
    }

    fn batch_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_fit_recovers_a_line() {
        let dataset = line_dataset();
        let mut model = LinearRegression::zeroed(1);
        let mut trainer = Trainer::new(GradientDescent::new(0.05), Mse, StdRng::seed_from_u64(0))
            .epochs(1000)
            .batch_size(batch_size(4))
            .shuffle(false);

        trainer.fit(&mut model, &dataset).unwrap();

        let y_pred = model.predict(arr2(&[[0.0], [1.0], [4.0]]).view());
        assert!((y_pred[0] - 1.0).abs() < 0.05, "got {}", y_pred[0]);
        assert!((y_pred[1] - 3.0).abs() < 0.05, "got {}", y_pred[1]);
        assert!((y_pred[2] - 9.0).abs() < 0.1, "got {}", y_pred[2]);
    }

    #[test]
    fn test_fit_reduces_loss() {
        let dataset = line_dataset();
        let mut model = LinearRegression::zeroed(1);
        let mut trainer = Trainer::new(GradientDescent::new(0.05), Mse, StdRng::seed_from_u64(0))
            .epochs(50)
            .batch_size(batch_size(4))
            .shuffle(false);

        let report = trainer.fit(&mut model, &dataset).unwrap();

        let first = report.epoch_losses().first().copied().unwrap();
        let last = report.final_loss().unwrap();
        assert!(last < first, "loss did not improve: {first} -> {last}");
    }

    #[test]
    fn test_report_has_one_loss_per_update_and_epoch() {
        // 10 rows in batches of 4 make 3 updates per epoch.
        let x = arr2(&[[0.0f32]; 10]);
        let y = arr1(&[0.0f32; 10]);
        let dataset = Dataset::from_parts(x, y).unwrap();

        let mut model = LinearRegression::zeroed(1);
        let mut trainer = Trainer::new(GradientDescent::new(0.01), Mse, StdRng::seed_from_u64(0))
            .epochs(7)
            .batch_size(batch_size(4));

        let report = trainer.fit(&mut model, &dataset).unwrap();

        assert_eq!(report.batch_losses().len(), 7 * 3);
        assert_eq!(report.epoch_losses().len(), 7);
    }

    #[test]
    fn test_fit_rejects_empty_dataset() {
        let dataset = Dataset::new(vec![], 1).unwrap();
        let mut model = LinearRegression::zeroed(1);
        let mut trainer = Trainer::new(GradientDescent::new(0.01), Mse, StdRng::seed_from_u64(0));

        assert!(matches!(
            trainer.fit(&mut model, &dataset),
            Err(MlErr::EmptyDataset)
        ));
    }

    #[test]
    fn test_fit_rejects_feature_mismatch() {
        let dataset = line_dataset();
        let mut model = LinearRegression::zeroed(3);
        let mut trainer = Trainer::new(GradientDescent::new(0.01), Mse, StdRng::seed_from_u64(0));

        assert!(matches!(
            trainer.fit(&mut model, &dataset),
            Err(MlErr::ShapeMismatch {
                got: 3,
                expected: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_shuffled_fit_is_deterministic_under_seed() {
        let run = || {
            let dataset = line_dataset();
            let mut model = LinearRegression::new(1, &mut StdRng::seed_from_u64(5));
            let mut trainer =
                Trainer::new(GradientDescent::new(0.02), Mse, StdRng::seed_from_u64(5))
                    .epochs(20)
                    .batch_size(batch_size(2));
            let report = trainer.fit(&mut model, &dataset).unwrap();
            (model.weights().to_owned(), model.bias(), report)
        };

        let (w1, b1, r1) = run();
        let (w2, b2, r2) = run();

        assert_eq!(w1, w2);
        assert_eq!(b1, b2);
        assert_eq!(r1, r2);
    }
}
