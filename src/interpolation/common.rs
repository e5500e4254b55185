//! Common utilities for scattered-data interpolation.
//!
//! This module provides shared functionality used by the resampling methods:
//! uniform grid construction and the convex-hull geometry that bounds where
//! a smooth interpolant is defined.

use crate::error::{Result, StaxError};

/// Tolerance used when comparing squared distances and cross products
pub const EPSILON: f64 = 1e-12;

/// `n` evenly spaced values spanning `[start, stop]`, endpoints included
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Minimum and maximum of a coordinate axis
pub fn axis_bounds(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(StaxError::Interpolation {
            message: "Cannot compute bounds of an empty coordinate array".to_string(),
        });
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Ok((min, max))
}

/// Validate that a sample set is non-empty and points/values agree in length
pub fn validate_samples(points: &[(f64, f64)], values: &[f32]) -> Result<()> {
    if points.is_empty() {
        return Err(StaxError::Interpolation {
            message: "No source samples to interpolate from".to_string(),
        });
    }
    if points.len() != values.len() {
        return Err(StaxError::Interpolation {
            message: format!(
                "Sample mismatch: {} points but {} values",
                points.len(),
                values.len()
            ),
        });
    }
    Ok(())
}

/// Cross product of the vectors OA and OB
fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Convex hull of a point set, counter-clockwise, via the monotone chain.
///
/// Degenerate inputs (fewer than three distinct points, or all collinear)
/// yield the sorted distinct points.
pub fn convex_hull(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut pts: Vec<(f64, f64)> = points.to_vec();
    pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<(f64, f64)> = Vec::with_capacity(pts.len() * 2);
    // Lower hull
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= EPSILON {
            hull.pop();
        }
        hull.push(p);
    }
    // Upper hull
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= EPSILON
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Whether a point lies inside or on the boundary of a convex hull.
///
/// Degenerate hulls (a point or a segment) only contain points within
/// `EPSILON` of themselves.
pub fn point_in_hull(hull: &[(f64, f64)], p: (f64, f64)) -> bool {
    match hull.len() {
        0 => false,
        1 => {
            let (dx, dy) = (p.0 - hull[0].0, p.1 - hull[0].1);
            dx * dx + dy * dy <= EPSILON
        }
        2 => point_on_segment(hull[0], hull[1], p),
        _ => hull.iter().enumerate().all(|(i, &a)| {
            let b = hull[(i + 1) % hull.len()];
            cross(a, b, p) >= -1e-9
        }),
    }
}

/// Whether a point lies on the segment AB, within tolerance
fn point_on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    if cross(a, b, p).abs() > 1e-9 {
        return false;
    }
    let dot = (p.0 - a.0) * (b.0 - a.0) + (p.1 - a.1) * (b.1 - a.1);
    let len2 = (b.0 - a.0) * (b.0 - a.0) + (b.1 - a.1) * (b.1 - a.1);
    dot >= -EPSILON && dot <= len2 + EPSILON
}
