//! Smooth scattered-data interpolation for drift-corrected coordinates.
//!
//! A modified-Shepard interpolant with a cubic inverse-distance falloff:
//! exact at the sample points, smooth between them. Outside the convex
//! hull of the source samples the estimate is undefined and NaN is
//! returned; callers that need full coverage should use the
//! nearest-neighbor method instead.

use super::ScatteredInterpolator;
use crate::error::Result;
use crate::interpolation::common;

/// Cubic-falloff scattered interpolator
pub struct CubicInterpolator;

impl ScatteredInterpolator for CubicInterpolator {
    fn interpolate(&self, points: &[(f64, f64)], values: &[f32], target: (f64, f64)) -> Result<f32> {
        common::validate_samples(points, values)?;

        // Exact at sample locations
        let mut weight_sum = 0.0f64;
        let mut value_sum = 0.0f64;
        for (i, &(x, y)) in points.iter().enumerate() {
            let (dx, dy) = (x - target.0, y - target.1);
            let d2 = dx * dx + dy * dy;
            if d2 <= common::EPSILON {
                return Ok(values[i]);
            }
            // Cubic falloff: w = 1 / d^3
            let w = 1.0 / (d2 * d2.sqrt());
            weight_sum += w;
            value_sum += w * values[i] as f64;
        }

        // Undefined outside the convex hull of the samples
        let hull = common::convex_hull(points);
        if !common::point_in_hull(&hull, target) {
            return Ok(f32::NAN);
        }

        Ok((value_sum / weight_sum) as f32)
    }

    fn name(&self) -> &str {
        "cubic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> (Vec<(f64, f64)>, Vec<f32>) {
        (
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            vec![1.0, 2.0, 3.0, 4.0],
        )
    }

    #[test]
    fn test_exact_at_sample_points() {
        let (points, values) = unit_square();
        let interpolator = CubicInterpolator;

        for (p, v) in points.iter().zip(values.iter()) {
            assert_eq!(interpolator.interpolate(&points, &values, *p).unwrap(), *v);
        }
    }

    #[test]
    fn test_interior_value_is_bounded_by_samples() {
        let (points, values) = unit_square();
        let interpolator = CubicInterpolator;

        let v = interpolator
            .interpolate(&points, &values, (0.5, 0.5))
            .unwrap();
        assert!(v >= 1.0 && v <= 4.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_constant_field_is_reproduced() {
        let (points, _) = unit_square();
        let values = vec![7.0; points.len()];
        let interpolator = CubicInterpolator;

        let v = interpolator
            .interpolate(&points, &values, (0.25, 0.75))
            .unwrap();
        assert!((v - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_nan_outside_convex_hull() {
        let (points, values) = unit_square();
        let interpolator = CubicInterpolator;

        let v = interpolator
            .interpolate(&points, &values, (2.0, 2.0))
            .unwrap();
        assert!(v.is_nan());

        let v = interpolator
            .interpolate(&points, &values, (-0.5, 0.5))
            .unwrap();
        assert!(v.is_nan());
    }

    #[test]
    fn test_error_cases() {
        let interpolator = CubicInterpolator;

        assert!(interpolator.interpolate(&[], &[], (0.0, 0.0)).is_err());
        assert!(interpolator
            .interpolate(&[(0.0, 0.0)], &[1.0, 2.0], (0.0, 0.0))
            .is_err());
    }
}
