//! Activation numerics for genome evaluation.
//!
//! The engine uses a single activation function, the hyperbolic tangent,
//! applied to a node's accumulated value when that value is forwarded across
//! a link or read as a network output.

/// Hyperbolic tangent mapping any finite real input into `(-1, 1)`.
///
/// NaN propagates consistently. Infinite inputs saturate to ±1 so that
/// unbounded weight growth cannot produce non-finite signals downstream.
#[inline]
#[must_use]
pub fn tanh(x: f32) -> f32 {
    if x.is_nan() {
        return f32::NAN;
    }
    if x == f32::INFINITY {
        return 1.0;
    }
    if x == f32::NEG_INFINITY {
        return -1.0;
    }
    x.tanh()
}
