//! Scattered-data resampling onto regular grids.
//!
//! This module reconstructs each 2D slice of a data cube on a uniform
//! rectilinear grid from irregularly placed source samples. The method is
//! chosen by the shape of the coordinate arrays: shared (1D) coordinates
//! are index-like and resampled with nearest-neighbor, per-slice (2D)
//! drift-corrected coordinates are resampled slice by slice with the
//! smooth cubic method.

pub mod common;
pub mod cubic;
pub mod nearest;

use ndarray::Array3;
use tracing::debug;

use crate::error::{Result, StaxError};
use crate::stack::CoordArray;

/// Trait for scattered-data interpolation methods
pub trait ScatteredInterpolator {
    /// Estimate the value at `target` from irregularly placed samples
    fn interpolate(&self, points: &[(f64, f64)], values: &[f32], target: (f64, f64)) -> Result<f32>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// Get an interpolator by name
pub fn get_interpolator(name: &str) -> Result<Box<dyn ScatteredInterpolator>> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Box::new(nearest::NearestInterpolator)),
        "cubic" => Ok(Box::new(cubic::CubicInterpolator)),
        _ => Err(StaxError::InvalidParameter {
            param: "interpolation".to_string(),
            message: format!("Unknown interpolation method: {}", name),
        }),
    }
}

/// Resample a data cube onto a uniform rectilinear grid.
///
/// The output has the same shape as the input; the target grid spans
/// `[min, max]` of the source coordinates in each axis with resolution
/// equal to the cube's row/column counts.
///
/// - Shared (1D) coordinates: one target grid for all slices, resampled
///   with nearest-neighbor. Defined everywhere.
/// - Per-slice (2D) coordinates: an independent target grid per slice,
///   scaled to that slice's own coordinate extent, resampled with the
///   cubic method. Grid points outside the convex hull of a slice's
///   source samples are NaN, not zero-filled.
///
/// Both coordinate arrays must have the same dimensionality and must match
/// the cube's row/column extents (and slice count, in the per-slice case).
pub fn resample_stack(
    cube: &Array3<f32>,
    x_dist: &CoordArray,
    y_dist: &CoordArray,
) -> Result<Array3<f32>> {
    let (rows, cols, slices) = cube.dim();
    if cube.is_empty() {
        return Ok(cube.clone());
    }

    match (x_dist, y_dist) {
        (CoordArray::Shared(x), CoordArray::Shared(y)) => {
            check_axis_len("x_dist", x.len(), rows)?;
            check_axis_len("y_dist", y.len(), cols)?;
            debug!(rows, cols, slices, method = "nearest", "Resampling cube");

            let x_src = x.to_vec();
            let y_src = y.to_vec();
            let (x_min, x_max) = common::axis_bounds(&x_src)?;
            let (y_min, y_max) = common::axis_bounds(&y_src)?;
            let xs = common::linspace(x_min, x_max, rows);
            let ys = common::linspace(y_min, y_max, cols);

            let mut points = Vec::with_capacity(rows * cols);
            for r in 0..rows {
                for c in 0..cols {
                    points.push((x[r], y[c]));
                }
            }

            let interpolator = nearest::NearestInterpolator;
            let mut out = Array3::zeros((rows, cols, slices));
            let mut values = vec![0.0f32; rows * cols];
            for s in 0..slices {
                for r in 0..rows {
                    for c in 0..cols {
                        values[r * cols + c] = cube[[r, c, s]];
                    }
                }
                for (i, &xi) in xs.iter().enumerate() {
                    for (j, &yj) in ys.iter().enumerate() {
                        out[[i, j, s]] = interpolator.interpolate(&points, &values, (xi, yj))?;
                    }
                }
            }
            Ok(out)
        }
        (CoordArray::PerSlice(x), CoordArray::PerSlice(y)) => {
            check_per_slice_shape("x_dist", x.dim(), rows, slices)?;
            check_per_slice_shape("y_dist", y.dim(), cols, slices)?;
            debug!(rows, cols, slices, method = "cubic", "Resampling cube");

            let interpolator = cubic::CubicInterpolator;
            let mut out = Array3::zeros((rows, cols, slices));
            for s in 0..slices {
                let x_s: Vec<f64> = x.column(s).to_vec();
                let y_s: Vec<f64> = y.column(s).to_vec();

                // Each slice gets a grid scaled to its own extent
                let (x_min, x_max) = common::axis_bounds(&x_s)?;
                let (y_min, y_max) = common::axis_bounds(&y_s)?;
                let xs = common::linspace(x_min, x_max, rows);
                let ys = common::linspace(y_min, y_max, cols);

                let mut points = Vec::with_capacity(rows * cols);
                let mut values = Vec::with_capacity(rows * cols);
                for r in 0..rows {
                    for c in 0..cols {
                        points.push((x_s[r], y_s[c]));
                        values.push(cube[[r, c, s]]);
                    }
                }

                for (i, &xi) in xs.iter().enumerate() {
                    for (j, &yj) in ys.iter().enumerate() {
                        out[[i, j, s]] = interpolator.interpolate(&points, &values, (xi, yj))?;
                    }
                }
            }
            Ok(out)
        }
        _ => Err(StaxError::InvalidCoordinates {
            message: format!(
                "Coordinate dimensionality mismatch: x_dist is {}D but y_dist is {}D",
                x_dist.ndim(),
                y_dist.ndim()
            ),
        }),
    }
}

fn check_axis_len(name: &str, len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(StaxError::InvalidCoordinates {
            message: format!("{} has {} positions but the cube axis has {}", name, len, expected),
        });
    }
    Ok(())
}

fn check_per_slice_shape(
    name: &str,
    dim: (usize, usize),
    positions: usize,
    slices: usize,
) -> Result<()> {
    if dim != (positions, slices) {
        return Err(StaxError::InvalidCoordinates {
            message: format!(
                "{} has shape ({}, {}) but the cube requires ({}, {})",
                name, dim.0, dim.1, positions, slices
            ),
        });
    }
    Ok(())
}
