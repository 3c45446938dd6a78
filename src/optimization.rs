use ndarray::Array1;

/// An update rule for the linear model's parameters.
pub trait Optimizer {
    /// Updates the weights and bias given the gradient of the batch loss.
    ///
    /// # Arguments
    /// * `weights` - The weight vector to modify.
    /// * `bias` - The bias to modify.
    /// * `grad_w` - The loss gradient with respect to the weights.
    /// * `grad_b` - The loss gradient with respect to the bias.
    fn update_params(
        &mut self,
        weights: &mut Array1<f32>,
        bias: &mut f32,
        grad_w: &Array1<f32>,
        grad_b: f32,
    );
}

/// Gradient descent optimization algorithm.
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length
    /// of `learning_rate`.
    fn update_params(
        &mut self,
        weights: &mut Array1<f32>,
        bias: &mut f32,
        grad_w: &Array1<f32>,
        grad_b: f32,
    ) {
        weights.scaled_add(-self.learning_rate, grad_w);
        *bias -= self.learning_rate * grad_b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_update_moves_against_the_gradient() {
        let mut weights = arr1(&[1.0, 2.0]);
        let mut bias = 0.5;
        let grad_w = arr1(&[0.5, -1.0]);

        let mut optimizer = GradientDescent::new(0.1);
        optimizer.update_params(&mut weights, &mut bias, &grad_w, 2.0);

        assert_eq!(weights, arr1(&[0.95, 2.1]));
        assert!((bias - 0.3).abs() < 1e-7);
    }

    #[test]
    fn test_zero_learning_rate_is_a_no_op() {
        let mut weights = arr1(&[1.0, -1.0]);
        let mut bias = 3.0;

        let mut optimizer = GradientDescent::new(0.0);
        optimizer.update_params(&mut weights, &mut bias, &arr1(&[10.0, 10.0]), 10.0);

        assert_eq!(weights, arr1(&[1.0, -1.0]));
        assert_eq!(bias, 3.0);
    }
}
