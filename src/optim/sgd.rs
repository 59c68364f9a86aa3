use crate::error::NetResult;
use crate::network::gradients::Gradients;
use crate::network::network::Network;

/// Plain full-batch gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to every layer of `network`.
    ///
    /// All gradient shapes are checked before the first parameter changes,
    /// so on error the network is left untouched.
    pub fn step(&self, network: &mut Network, gradients: &Gradients) -> NetResult<()> {
        gradients.check_against(network)?;
        for (layer, grads) in network.layers_mut().iter_mut().zip(gradients.layers.iter()) {
            layer.apply_gradients(grads, self.learning_rate)?;
        }
        Ok(())
    }
}
