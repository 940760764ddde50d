//! Linear interpolation between curve points.

use crate::error::{MathError, MathResult};

/// Linearly interpolates between two points `(x0, y0)` and `(x1, y1)` at
/// abscissa `x`.
///
/// Equal abscissae degenerate to returning `y0` directly, guarding the
/// division in the interpolation weight.
///
/// # Example
///
/// ```rust
/// use pylon_math::interpolation::linear_between;
///
/// let y = linear_between((0.0, 1.0), (100.0, 0.9), 50.0);
/// assert!((y - 0.95).abs() < 1e-12);
/// ```
#[must_use]
pub fn linear_between(p0: (f64, f64), p1: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = p0;
    let (x1, y1) = p1;

    if x0 == x1 {
        return y0;
    }

    let t = (x - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

/// Linearly interpolates within a sorted series of points, rejecting
/// queries outside the covered range.
///
/// # Errors
///
/// Returns `MathError::ExtrapolationNotAllowed` when `x` falls outside
/// `[xs.first(), xs.last()]`, and `MathError::InvalidInput` on malformed
/// series.
pub fn linear_series(xs: &[f64], ys: &[f64], x: f64) -> MathResult<f64> {
    if xs.len() < 2 {
        return Err(MathError::invalid_input(format!(
            "need at least 2 points, got {}",
            xs.len()
        )));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }

    let min = xs[0];
    let max = xs[xs.len() - 1];
    if x < min || x > max {
        return Err(MathError::ExtrapolationNotAllowed { x, min, max });
    }

    // Binary search for the segment containing x
    let i = match xs.binary_search_by(|probe| {
        probe
            .partial_cmp(&x)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        Ok(i) => i.min(xs.len() - 2),
        Err(i) => (i.saturating_sub(1)).min(xs.len() - 2),
    };

    Ok(linear_between((xs[i], ys[i]), (xs[i + 1], ys[i + 1]), x))
}
