use crate::math::matrix::Matrix;

/// Per-layer outputs of one forward pass.
///
/// Entry 0 is the input batch itself; entry `c` is the sigmoid output of
/// layer `c`, shaped `width[c] × m`.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    pub(crate) layers: Vec<Matrix>,
    /// Parameter version of the network that produced these.
    pub(crate) version: u64,
}

impl Activations {
    /// Activation of layer `c` (`0` is the input).
    pub fn get(&self, c: usize) -> Option<&Matrix> {
        self.layers.get(c)
    }

    pub fn input(&self) -> &Matrix {
        &self.layers[0]
    }

    /// Final-layer activation.
    pub fn output(&self) -> &Matrix {
        &self.layers[self.layers.len() - 1]
    }

    /// Number of stored matrices, i.e. `L + 1`.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn n_examples(&self) -> usize {
        self.input().cols
    }

    pub fn into_output(mut self) -> Matrix {
        self.layers.pop().unwrap_or_default()
    }
}
