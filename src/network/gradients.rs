use crate::error::{NetError, NetResult};
use crate::layers::dense::LayerGradients;
use crate::network::network::Network;

/// Gradients for every layer of a network, layer 1 first.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub layers: Vec<LayerGradients>,
}

impl Gradients {
    /// Gradient of layer `c` (`1..=L`).
    pub fn layer(&self, c: usize) -> Option<&LayerGradients> {
        c.checked_sub(1).and_then(|i| self.layers.get(i))
    }

    /// Fails unless there is one gradient per layer with matching shapes.
    pub fn check_against(&self, network: &Network) -> NetResult<()> {
        if self.layers.len() != network.layers().len() {
            return Err(NetError::shape(
                "Gradients layer count",
                (network.layers().len(), 1),
                (self.layers.len(), 1),
            ));
        }
        network.layers().iter()
            .zip(self.layers.iter())
            .try_for_each(|(layer, grads)| layer.check_gradients(grads))
    }
}
