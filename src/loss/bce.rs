use crate::error::{NetError, NetResult};
use crate::math::matrix::Matrix;

/// Binary cross-entropy paired with a sigmoid output layer.
pub struct BceLoss;

/// Predictions are clipped to `[EPS, 1 - EPS]` before taking logs.
const EPS: f64 = 1e-15;

impl BceLoss {
    /// Scalar BCE over every entry: -mean(y·log(p) + (1-y)·log(1-p)).
    ///
    /// Both matrices must have the same non-empty shape.
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> NetResult<f64> {
        expected.ensure_shape(predicted.shape(), "BceLoss::loss labels")?;
        let n = predicted.rows * predicted.cols;
        if n == 0 {
            return Err(NetError::shape("BceLoss::loss predictions", (1, 1), predicted.shape()));
        }
        let total: f64 = predicted.values().zip(expected.values())
            .map(|(p, y)| {
                let p = p.clamp(EPS, 1.0 - EPS);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum();
        Ok(total / n as f64)
    }

    /// Error signal at the output pre-activation: `p - y`.
    ///
    /// This is ∂BCE/∂z for `p = σ(z)`; the sigmoid derivative cancels, so the
    /// output layer's delta needs no extra factor.
    pub fn output_delta(predicted: &Matrix, expected: &Matrix) -> NetResult<Matrix> {
        predicted.sub(expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninformed_prediction_costs_ln_two() {
        let p = Matrix::row_vector(vec![0.5, 0.5]);
        let y = Matrix::row_vector(vec![0.0, 1.0]);
        assert!((BceLoss::loss(&p, &y).unwrap() - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn confident_wrong_prediction_is_finite() {
        let p = Matrix::row_vector(vec![0.0, 1.0]);
        let y = Matrix::row_vector(vec![1.0, 0.0]);
        let loss = BceLoss::loss(&p, &y).unwrap();
        assert!(loss.is_finite());
        assert!(loss > 30.0);
    }

    #[test]
    fn perfect_prediction_is_near_zero() {
        let p = Matrix::row_vector(vec![1.0, 0.0]);
        let y = Matrix::row_vector(vec![1.0, 0.0]);
        assert!(BceLoss::loss(&p, &y).unwrap() < 1e-12);
    }

    #[test]
    fn mismatched_label_count_is_rejected() {
        let p = Matrix::row_vector(vec![0.5, 0.5]);
        let y = Matrix::row_vector(vec![1.0]);
        assert!(matches!(BceLoss::loss(&p, &y), Err(NetError::ShapeMismatch { .. })));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let empty = Matrix::zeros(1, 0);
        assert!(matches!(BceLoss::loss(&empty, &empty), Err(NetError::ShapeMismatch { .. })));
    }

    #[test]
    fn output_delta_is_difference() {
        let p = Matrix::row_vector(vec![0.75, 0.25]);
        let y = Matrix::row_vector(vec![1.0, 0.0]);
        assert_eq!(BceLoss::output_delta(&p, &y).unwrap().data, vec![vec![-0.25, 0.25]]);
    }
}
