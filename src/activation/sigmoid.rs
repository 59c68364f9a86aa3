/// Largest `f64` strictly below 1.0.
const UPPER: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic function `1 / (1 + e^-z)`.
///
/// Branches on the sign of `z` so `exp` only ever sees non-positive
/// arguments and cannot overflow. The result is clamped into the open
/// interval (0, 1): in `f64` a saturated sigmoid would otherwise round to
/// exactly 0.0 or 1.0.
pub fn sigmoid(z: f64) -> f64 {
    let s = if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    };
    s.clamp(f64::MIN_POSITIVE, UPPER)
}

/// σ'(z) expressed through the activation `a = σ(z)`.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}
