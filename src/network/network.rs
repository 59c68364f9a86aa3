use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};
use crate::layers::dense::Layer;
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::network::activations::Activations;
use crate::network::dimensions::Dimensions;
use crate::network::gradients::Gradients;

/// Output activations at or above this value are classified as 1.
pub const DECISION_THRESHOLD: f64 = 0.5;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// The parameter store: one `Layer` per entry of `dimensions` after the
/// input, in order. Layer `c` lives at `layers[c - 1]`.
///
/// `version` names the current parameter values. It is unique per process,
/// shared by clones, and replaced on every mutable access, so activations
/// can be matched to the exact parameters that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    #[serde(skip, default = "next_version")]
    version: u64,
}

impl PartialEq for Network {
    fn eq(&self, other: &Network) -> bool {
        self.dimensions == other.dimensions && self.layers == other.layers
    }
}

impl Network {
    /// Builds the layers described by `dimensions`, drawing weights from `rng`.
    pub fn initialise<R: Rng + ?Sized>(dimensions: &Dimensions, rng: &mut R) -> Network {
        let layers = dimensions.weight_shapes()
            .map(|(size, input_size)| Layer::new(size, input_size, rng))
            .collect();
        Network { dimensions: dimensions.clone(), layers, version: next_version() }
    }

    /// `initialise` with a fresh `StdRng` seeded from `seed`.
    pub fn with_seed(dimensions: &Dimensions, seed: u64) -> Network {
        Network::initialise(dimensions, &mut StdRng::seed_from_u64(seed))
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable parameters. Activations computed before this call are no
    /// longer accepted by `backward`.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        self.version = next_version();
        &mut self.layers
    }

    /// Runs the whole batch (`width[0] × m`) through every layer.
    pub fn forward(&self, input: &Matrix) -> NetResult<Activations> {
        input.ensure_shape((self.dimensions.input_size(), input.cols), "Network::forward input")?;

        let mut layers = Vec::with_capacity(self.layers.len() + 1);
        layers.push(input.clone());
        for layer in &self.layers {
            let next = layer.feed_from(&layers[layers.len() - 1])?;
            layers.push(next);
        }
        Ok(Activations { layers, version: self.version })
    }

    /// Gradients of the mean binary cross-entropy with respect to every
    /// parameter, given the activations of a forward pass of this network
    /// and the `output_width × m` labels of the same batch.
    pub fn backward(&self, labels: &Matrix, activations: &Activations) -> NetResult<Gradients> {
        self.check_activations(activations)?;
        let m = activations.n_examples();
        labels.ensure_shape((self.dimensions.output_size(), m), "Network::backward labels")?;

        let mut delta = BceLoss::output_delta(activations.output(), labels)?;
        let mut grads = Vec::with_capacity(self.layers.len());

        for c in (1..=self.layers.len()).rev() {
            let layer = &self.layers[c - 1];
            let inputs = &activations.layers[c - 1];

            grads.push(layer.compute_gradients(&delta, inputs)?);

            if c > 1 {
                delta = layer.propagate_delta(&delta, inputs)?;
            }
        }

        grads.reverse();
        Ok(Gradients { layers: grads })
    }

    /// Final-layer activations for `input`, i.e. P(class = 1).
    pub fn predict_proba(&self, input: &Matrix) -> NetResult<Matrix> {
        Ok(self.forward(input)?.into_output())
    }

    /// Hard 0/1 labels for `input`.
    pub fn predict(&self, input: &Matrix) -> NetResult<Matrix> {
        Ok(Network::binarize(&self.predict_proba(input)?))
    }

    /// 1.0 where `a >= DECISION_THRESHOLD`, else 0.0.
    pub fn binarize(output: &Matrix) -> Matrix {
        output.map(|a| if a >= DECISION_THRESHOLD { 1.0 } else { 0.0 })
    }

    /// Checks every layer against `dimensions`.
    pub fn validate(&self) -> NetResult<()> {
        if self.layers.len() != self.dimensions.n_layers() {
            return Err(NetError::shape(
                "Network layer count",
                (self.dimensions.n_layers(), 1),
                (self.layers.len(), 1),
            ));
        }
        for (layer, shape) in self.layers.iter().zip(self.dimensions.weight_shapes()) {
            layer.weights.ensure_shape(shape, "Network weights")?;
            layer.biases.ensure_shape((shape.0, 1), "Network biases")?;
        }
        Ok(())
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> NetResult<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> NetResult<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        Ok(network)
    }

    fn check_activations(&self, activations: &Activations) -> NetResult<()> {
        if activations.version != self.version {
            return Err(NetError::shape(
                "Activations parameter version",
                (self.version as usize, 1),
                (activations.version as usize, 1),
            ));
        }
        let expected = self.layers.len() + 1;
        if activations.len() != expected {
            return Err(NetError::shape(
                "Activations layer count",
                (expected, 1),
                (activations.len(), 1),
            ));
        }
        let m = activations.n_examples();
        if m == 0 {
            return Err(NetError::shape(
                "Activations batch size",
                (self.dimensions.input_size(), 1),
                (self.dimensions.input_size(), 0),
            ));
        }
        for (c, a) in activations.layers.iter().enumerate() {
            a.ensure_shape((self.dimensions.width(c), m), "Activations layer shape")?;
        }
        Ok(())
    }
}
