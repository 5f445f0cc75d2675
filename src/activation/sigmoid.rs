use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid expressed through its own output.
///
/// `y` must already be `sigmoid(x)`: σ'(x) = σ(x)·(1 − σ(x)) = y·(1 − y).
/// Passing a pre-activation value here gives a wrong gradient.
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}
