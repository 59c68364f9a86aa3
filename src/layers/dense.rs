use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::error::NetResult;
use crate::math::matrix::Matrix;

/// Scale applied to N(0, 1) weight samples so initial pre-activations stay
/// in the near-linear part of the sigmoid.
pub const INIT_SCALE: f64 = 0.01;

/// One fully-connected sigmoid layer.
///
/// `weights` is `size × input_size`, `biases` is `size × 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Matrix,
}

/// Gradients for one layer; shapes mirror `Layer`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        Layer {
            weights: Matrix::standard_normal(size, input_size, INIT_SCALE, rng),
            biases: Matrix::zeros(size, 1),
        }
    }

    pub fn size(&self) -> usize {
        self.weights.rows
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    /// `σ(W · input + b)` for a whole batch (`input_size × m`).
    pub fn feed_from(&self, input: &Matrix) -> NetResult<Matrix> {
        let z = self.weights.dot(input)?.add_column(&self.biases)?;
        Ok(z.map(sigmoid))
    }

    /// Weight and bias gradients from this layer's error signal `delta`
    /// (`size × m`) and the activations that fed it (`input_size × m`).
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> NetResult<LayerGradients> {
        let inv_m = 1.0 / delta.cols as f64;
        let weights = delta.dot(&inputs.transpose())?.scale(inv_m);
        let biases = delta.sum_columns().scale(inv_m);
        Ok(LayerGradients { weights, biases })
    }

    /// Error signal for the previous layer: `(Wᵀ · δ) ⊙ a ⊙ (1 - a)`, where
    /// `a` are the sigmoid activations that fed this layer.
    pub fn propagate_delta(&self, delta: &Matrix, inputs: &Matrix) -> NetResult<Matrix> {
        let back = self.weights.transpose().dot(delta)?;
        back.hadamard(&inputs.map(sigmoid_derivative))
    }

    /// Fails unless `grads` has exactly this layer's shapes.
    pub fn check_gradients(&self, grads: &LayerGradients) -> NetResult<()> {
        grads.weights.ensure_shape(self.weights.shape(), "Layer weight gradient")?;
        grads.biases.ensure_shape(self.biases.shape(), "Layer bias gradient")
    }

    /// `W -= lr · dW`, `b -= lr · db`.
    pub fn apply_gradients(&mut self, grads: &LayerGradients, lr: f64) -> NetResult<()> {
        self.check_gradients(grads)?;
        self.weights.sub_scaled_assign(&grads.weights, lr)?;
        self.biases.sub_scaled_assign(&grads.biases, lr)
    }
}
