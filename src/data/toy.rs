//! Small built-in datasets for demos and tests.

use crate::data::dataset::Dataset;
use crate::math::matrix::Matrix;

/// Rows are examples here; the dataset stores them as columns.
fn build(samples: Vec<Vec<f64>>, labels: Vec<f64>) -> Dataset {
    let n_features = samples.first().map_or(0, Vec::len);
    let features = Matrix { rows: samples.len(), cols: n_features, data: samples }.transpose();
    Dataset { features, labels: Matrix::row_vector(labels) }
}

/// Logical AND of two bits: only (1, 1) is labelled 1.
pub fn builtin_and() -> Dataset {
    build(
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![0.0, 0.0, 0.0, 1.0],
    )
}

/// Logical XOR of two bits; not linearly separable.
pub fn builtin_xor() -> Dataset {
    build(
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![0.0, 1.0, 1.0, 0.0],
    )
}

/// Generates `n` samples of 2D "two blobs" data in [0, 1]², class 0 around
/// (0.3, 0.3) and class 1 around (0.7, 0.7). The spread is deterministic.
pub fn builtin_blobs(n: usize) -> Dataset {
    let n = n.max(2);
    let mut inputs = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    let centers = [(0.3f64, 0.3f64), (0.7f64, 0.7f64)];
    for i in 0..n {
        let class = i % 2;
        let (cx, cy) = centers[class];
        let angle = i as f64 * 2.399;
        let r = 0.12 * (i as f64 * 0.31).sin().abs();
        let x = (cx + r * angle.cos()).clamp(0.0, 1.0);
        let y = (cy + r * angle.sin()).clamp(0.0, 1.0);
        inputs.push(vec![x, y]);
        labels.push(class as f64);
    }
    build(inputs, labels)
}
