use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ferrite_dnn::{Dimensions, Matrix, Network, Sgd};

fn widths() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..6, 2..5)
}

/// Inputs drawn wide enough to push some pre-activations deep into saturation.
fn batch(n_features: usize, m: usize, seed: u64) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = Matrix::standard_normal(n_features, m, 40.0, &mut rng);
    let y = Matrix::row_vector((0..m).map(|j| if x.data[0][j] >= 0.0 { 1.0 } else { 0.0 }).collect());
    (x, y)
}

proptest! {
    #[test]
    fn initialised_parameters_follow_dimensions(widths in widths(), seed in any::<u64>()) {
        let dims = Dimensions::new(widths.clone()).unwrap();
        let network = Network::with_seed(&dims, seed);

        prop_assert_eq!(network.layers().len(), widths.len() - 1);
        for (c, layer) in network.layers().iter().enumerate() {
            prop_assert_eq!(layer.weights.shape(), (widths[c + 1], widths[c]));
            prop_assert_eq!(layer.biases.shape(), (widths[c + 1], 1));
            prop_assert!(layer.biases.values().all(|b| b == 0.0));
        }
    }

    #[test]
    fn forward_activations_are_open_unit_interval(
        widths in widths(),
        m in 1usize..8,
        seed in any::<u64>(),
    ) {
        let dims = Dimensions::new(widths.clone()).unwrap();
        let network = Network::with_seed(&dims, seed);
        let (x, _) = batch(widths[0], m, seed);

        let activations = network.forward(&x).unwrap();
        prop_assert_eq!(activations.len(), widths.len());
        for c in 1..widths.len() {
            let a = activations.get(c).unwrap();
            prop_assert_eq!(a.shape(), (widths[c], m));
            prop_assert!(a.values().all(|v| v > 0.0 && v < 1.0));
        }

        let again = network.forward(&x).unwrap();
        prop_assert_eq!(again.output(), activations.output());
    }

    #[test]
    fn gradients_mirror_parameter_shapes(
        hidden in prop::collection::vec(1usize..6, 0..3),
        n_features in 1usize..5,
        m in 1usize..8,
        seed in any::<u64>(),
    ) {
        let dims = Dimensions::from_topology(n_features, &hidden, 1).unwrap();
        let network = Network::with_seed(&dims, seed);
        let (x, y) = batch(n_features, m, seed);

        let activations = network.forward(&x).unwrap();
        let gradients = network.backward(&y, &activations).unwrap();
        for (c, layer) in network.layers().iter().enumerate() {
            let g = gradients.layer(c + 1).unwrap();
            prop_assert_eq!(g.weights.shape(), layer.weights.shape());
            prop_assert_eq!(g.biases.shape(), layer.biases.shape());
            prop_assert!(g.weights.values().chain(g.biases.values()).all(f64::is_finite));
        }
    }

    #[test]
    fn update_moves_each_parameter_by_scaled_gradient(
        hidden in prop::collection::vec(1usize..5, 1..3),
        lr in 0.0f64..2.0,
        seed in any::<u64>(),
    ) {
        let dims = Dimensions::from_topology(3, &hidden, 1).unwrap();
        let before = Network::with_seed(&dims, seed);
        let (x, y) = batch(3, 5, seed);
        let gradients = before.backward(&y, &before.forward(&x).unwrap()).unwrap();

        let mut after = before.clone();
        Sgd::new(lr).step(&mut after, &gradients).unwrap();

        for (c, (old, new)) in before.layers().iter().zip(after.layers()).enumerate() {
            let g = gradients.layer(c + 1).unwrap();
            for ((w_old, w_new), dw) in old.weights.values().zip(new.weights.values()).zip(g.weights.values()) {
                prop_assert!((w_new - (w_old - lr * dw)).abs() <= 1e-12);
            }
            for ((b_old, b_new), db) in old.biases.values().zip(new.biases.values()).zip(g.biases.values()) {
                prop_assert!((b_new - (b_old - lr * db)).abs() <= 1e-12);
            }
        }
    }

    #[test]
    fn zero_learning_rate_leaves_parameters_unchanged(seed in any::<u64>()) {
        let dims = Dimensions::new(vec![2, 4, 1]).unwrap();
        let before = Network::with_seed(&dims, seed);
        let (x, y) = batch(2, 4, seed);
        let gradients = before.backward(&y, &before.forward(&x).unwrap()).unwrap();

        let mut after = before.clone();
        Sgd::new(0.0).step(&mut after, &gradients).unwrap();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn binarize_splits_at_one_half(p in 0.0f64..1.0) {
        let out = Network::binarize(&Matrix::row_vector(vec![p, 0.5]));
        prop_assert_eq!(out.data[0][0], if p >= 0.5 { 1.0 } else { 0.0 });
        prop_assert_eq!(out.data[0][1], 1.0);
    }
}
