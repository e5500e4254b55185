//! Nearest-neighbor scattered-data interpolation.
//!
//! This method takes the value of the closest source sample. It never
//! blends values, so it is the right choice for index-like coordinate
//! sets where a smoother method would fabricate structure, and it is
//! defined everywhere (no convex-hull restriction).

use super::ScatteredInterpolator;
use crate::error::Result;
use crate::interpolation::common;

/// Nearest-neighbor scattered interpolator
pub struct NearestInterpolator;

impl ScatteredInterpolator for NearestInterpolator {
    fn interpolate(&self, points: &[(f64, f64)], values: &[f32], target: (f64, f64)) -> Result<f32> {
        common::validate_samples(points, values)?;

        let mut best = 0;
        let mut best_d2 = f64::INFINITY;
        for (i, &(x, y)) in points.iter().enumerate() {
            let (dx, dy) = (x - target.0, y - target.1);
            let d2 = dx * dx + dy * dy;
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }
        Ok(values[best])
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
