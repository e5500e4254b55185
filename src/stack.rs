//! In-memory representation of a loaded image stack.
//!
//! This module defines the data object that providers populate and the
//! loader post-processes: a 3D cube indexed `(row, column, slice)` together
//! with the coordinate arrays describing where each row/column was sampled.

use ndarray::{Array1, Array2, Array3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, StaxError};

/// Possible metadata attribute values carried alongside a stack
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute
    Text(String),
    /// Numeric attribute (stored as f64 for simplicity)
    Number(f64),
    /// Array of numbers
    NumberArray(Vec<f64>),
}

/// Spatial sampling positions along one cube axis.
///
/// A `Shared` array holds one coordinate vector used by every slice. A
/// `PerSlice` array holds one vector per slice (axis 1 indexes the slice),
/// which allows per-slice drift correction. Within one resampling call the
/// x and y arrays must have the same dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordArray {
    /// One coordinate vector shared across all slices
    Shared(Array1<f64>),
    /// One coordinate vector per slice, shape (positions, slices)
    PerSlice(Array2<f64>),
}

impl CoordArray {
    /// Number of dimensions of the underlying array (1 or 2)
    pub fn ndim(&self) -> usize {
        match self {
            CoordArray::Shared(_) => 1,
            CoordArray::PerSlice(_) => 2,
        }
    }

    /// Number of sampling positions along the axis this array describes
    pub fn positions(&self) -> usize {
        match self {
            CoordArray::Shared(a) => a.len(),
            CoordArray::PerSlice(a) => a.dim().0,
        }
    }

    /// A plain integer index sequence 0..n, used after stitching when the
    /// merged cube no longer carries meaningful physical coordinates.
    pub fn indices(n: usize) -> Self {
        CoordArray::Shared(Array1::from_iter((0..n).map(|i| i as f64)))
    }
}

/// A loaded image/spectral stack.
///
/// The cube is indexed `(row, column, slice)`. `x_dist`/`y_dist` are the
/// as-stored sampling coordinates for rows and columns respectively;
/// `x_dist_instr`/`y_dist_instr` are the physical instrument grid the data
/// is projected onto after loading. `interpolated` holds that projection,
/// leaving `absdata` untouched.
///
/// A stack must be owned exclusively by the calling context for the duration
/// of any load or resampling call. Concurrent calls on *different* stacks are
/// independent; sharing one stack across threads during a call is undefined
/// and must be prevented by the caller. There is no internal locking.
#[derive(Debug, Clone, Default)]
pub struct ImageStack {
    /// The raw data cube, shape (rows, cols, slices)
    pub absdata: Array3<f32>,
    /// Energy or channel value per slice
    pub ev: Array1<f64>,
    /// As-stored row sampling coordinates
    pub x_dist: Option<CoordArray>,
    /// As-stored column sampling coordinates
    pub y_dist: Option<CoordArray>,
    /// Instrument row sampling grid
    pub x_dist_instr: Option<CoordArray>,
    /// Instrument column sampling grid
    pub y_dist_instr: Option<CoordArray>,
    /// The cube resampled onto the instrument grid
    pub interpolated: Option<Array3<f32>>,
    /// Provider-supplied metadata
    pub metadata: HashMap<String, AttributeValue>,
}

impl ImageStack {
    /// Create an empty stack for a provider to populate
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the cube
    pub fn n_rows(&self) -> usize {
        self.absdata.dim().0
    }

    /// Number of columns in the cube
    pub fn n_cols(&self) -> usize {
        self.absdata.dim().1
    }

    /// Number of energy/channel slices in the cube
    pub fn n_slices(&self) -> usize {
        self.absdata.dim().2
    }

    /// Whether a provider has populated the cube
    pub fn is_empty(&self) -> bool {
        self.absdata.is_empty()
    }

    /// Get a metadata attribute with error handling
    pub fn get_attribute_checked(&self, name: &str) -> Result<&AttributeValue> {
        self.metadata
            .get(name)
            .ok_or_else(|| StaxError::DataNotFound {
                message: format!("Attribute not found: {}", name),
            })
    }

    /// Replace both stored coordinate arrays with plain index sequences
    /// matching the current cube extents.
    pub fn reindex_coordinates(&mut self) {
        self.x_dist = Some(CoordArray::indices(self.n_rows()));
        self.y_dist = Some(CoordArray::indices(self.n_cols()));
    }

    /// The coordinate arrays the cube must be resampled onto: the instrument
    /// grid when the provider supplied one, falling back to the as-stored
    /// coordinates and finally to plain index sequences.
    pub fn instrument_coordinates(&self) -> (CoordArray, CoordArray) {
        let x = self
            .x_dist_instr
            .clone()
            .or_else(|| self.x_dist.clone())
            .unwrap_or_else(|| CoordArray::indices(self.n_rows()));
        let y = self
            .y_dist_instr
            .clone()
            .or_else(|| self.y_dist.clone())
            .unwrap_or_else(|| CoordArray::indices(self.n_cols()));
        (x, y)
    }
}
