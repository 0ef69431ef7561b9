//! Effective light range.
//!
//! The range of a point or spot light is the distance `r` at which
//! `constant + linear * r + quadratic * r^2` reaches the light's peak output
//! `intensity * max(r, g, b)`. Beyond it the contribution is treated as
//! negligible, which lets the renderer size per-light volumes.

use super::{Attenuation, LightError};

/// Solve the attenuation polynomial for the positive root.
///
/// `peak` is `intensity * max_channel` on the 0-255 color scale.
///
/// A non-positive (or NaN) quadratic term and a negative discriminant are
/// reported as errors instead of producing NaN or infinity. A successful
/// result is not clamped: when `peak < constant` and `linear > 0` the root is
/// negative and returned as-is.
pub fn compute_range(attenuation: &Attenuation, peak: f32) -> Result<f32, LightError> {
    let Attenuation {
        constant,
        linear,
        quadratic,
    } = *attenuation;

    // Also rejects NaN.
    if !(quadratic > 0.0) {
        return Err(LightError::NoQuadraticFalloff { quadratic });
    }

    let discriminant = linear * linear - 4.0 * quadratic * (constant - peak);
    if !(discriminant >= 0.0) {
        return Err(LightError::NegativeDiscriminant { discriminant });
    }

    Ok((-linear + discriminant.sqrt()) / (2.0 * quadratic))
}
