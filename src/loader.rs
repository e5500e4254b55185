//! Load/save orchestration over the provider registry.
//!
//! This module routes load, save and structure-inspection requests to a
//! provider (explicit or dispatched), stitches multi-selection loads into
//! one cube, and projects every loaded cube onto the instrument sampling
//! grid.

use ndarray::{concatenate, s, Array3, Axis};
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::interpolation::resample_stack;
use crate::provider::{DataType, FileProvider, FileStructure, Selection};
use crate::registry::Registry;
use crate::stack::ImageStack;

/// Outcome of a load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Data was loaded by the named provider
    Loaded {
        /// Title of the provider that handled the file
        provider: String,
    },
    /// No provider claimed the file; nothing was loaded.
    ///
    /// This is a normal outcome for unsupported files, not an error.
    NoProvider,
}

/// Load data from a file into the stack.
///
/// When no explicit provider is given the registry's dispatcher picks one;
/// dispatch failure yields `LoadOutcome::NoProvider` and leaves the stack
/// untouched. With more than one selection, the per-selection cubes are
/// stitched along the row axis, zero-padding the narrower cube's column
/// axis, and the stored coordinate arrays are reset to index sequences.
/// Whatever path populated the cube, it is then resampled onto the stack's
/// instrument coordinates and stored in `stack.interpolated`.
///
/// Provider read failures surface unmodified.
pub fn load(
    registry: &Registry,
    filename: &Path,
    stack: &mut ImageStack,
    provider: Option<&dyn FileProvider>,
    selection: Option<&[Selection]>,
    options: Option<&serde_json::Value>,
) -> Result<LoadOutcome> {
    let provider = match provider {
        Some(p) => p,
        None => match registry.identify(filename) {
            Some(p) => p,
            None => return Ok(LoadOutcome::NoProvider),
        },
    };
    info!(
        file = %filename.display(),
        provider = provider.title(),
        "Loading file"
    );

    match selection {
        None => {
            provider.read(filename, stack, None, options)?;
        }
        Some([single]) => {
            provider.read(filename, stack, Some(single), options)?;
            info!(
                rows = stack.n_rows(),
                cols = stack.n_cols(),
                slices = stack.n_slices(),
                "Loaded selection"
            );
        }
        Some([]) => {
            warn!(file = %filename.display(), "Empty selection list, reading whole file");
            provider.read(filename, stack, None, options)?;
        }
        Some(selections) => {
            // The options blob applies to the first selection only
            provider.read(filename, stack, Some(&selections[0]), options)?;
            let mut full = stack.absdata.clone();
            for sel in &selections[1..] {
                let mut scratch = ImageStack::new();
                provider.read(filename, &mut scratch, Some(sel), None)?;
                full = stitch_rows(full, scratch.absdata)?;
            }
            stack.absdata = full;
            info!(
                rows = stack.n_rows(),
                cols = stack.n_cols(),
                slices = stack.n_slices(),
                "Merged selections"
            );
            // The stitched cube no longer carries meaningful physical
            // coordinates, and the first selection's instrument grid no
            // longer matches the merged extents
            stack.reindex_coordinates();
            stack.x_dist_instr = None;
            stack.y_dist_instr = None;
        }
    }

    let (x_instr, y_instr) = stack.instrument_coordinates();
    stack.interpolated = Some(resample_stack(&stack.absdata, &x_instr, &y_instr)?);

    Ok(LoadOutcome::Loaded {
        provider: provider.title().to_string(),
    })
}

/// Write a data object to a file via the given provider.
///
/// Provider write failures surface unmodified; a read-only provider yields
/// `UnsupportedOperation`.
pub fn save(
    filename: &Path,
    stack: &ImageStack,
    data_type: DataType,
    provider: &dyn FileProvider,
) -> Result<()> {
    info!(
        file = %filename.display(),
        provider = provider.title(),
        data_type = %data_type,
        "Saving file"
    );
    provider.write(filename, stack, data_type)
}

/// Skim-read a file and return the structure of its choosable data subsets.
///
/// Returns `Ok(None)` when no provider claims the file or when the file
/// contains a single unambiguous dataset.
pub fn get_file_structure(
    registry: &Registry,
    filename: &Path,
    provider: Option<&dyn FileProvider>,
) -> Result<Option<FileStructure>> {
    let provider = match provider {
        Some(p) => p,
        None => match registry.identify(filename) {
            Some(p) => p,
            None => return Ok(None),
        },
    };
    info!(
        file = %filename.display(),
        provider = provider.title(),
        "Reading file structure"
    );
    provider.structure(filename)
}

/// Append `next`'s rows onto `full`, reconciling column counts first.
///
/// The narrower cube is zero-padded on the column axis so both share the
/// max column count; a column-width difference is a structural property of
/// multi-region scans, never an error. The slice axes must agree.
pub(crate) fn stitch_rows(full: Array3<f32>, next: Array3<f32>) -> Result<Array3<f32>> {
    let cols = full.dim().1.max(next.dim().1);
    let full = pad_columns(full, cols);
    let next = pad_columns(next, cols);
    let merged = concatenate(Axis(0), &[full.view(), next.view()])?;
    Ok(merged)
}

/// Zero-pad a cube's column axis up to `cols`
fn pad_columns(cube: Array3<f32>, cols: usize) -> Array3<f32> {
    let (r, c, slices) = cube.dim();
    if c >= cols {
        return cube;
    }
    let mut padded = Array3::zeros((r, cols, slices));
    padded.slice_mut(s![.., ..c, ..]).assign(&cube);
    padded
}
