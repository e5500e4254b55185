//! # stax
//!
//! A file-format provider registry and grid resampler for spectromicroscopy
//! image stacks.
//!
//! This library routes load/save/structure-inspection requests to the right
//! file-format provider by extension-first, fallback-to-probe dispatch, and
//! post-processes loaded stacks by resampling them onto a regular grid via
//! 2D scattered-data interpolation.
//!
//! ## Key Features
//!
//! - **Explicit provider registry**: register capability providers at
//!   startup, then treat the registry as read-only process state
//! - **Extension-first dispatch**: content probes run only on providers
//!   claiming the file's extension, in registration order
//! - **Multi-selection stitching**: sub-scans merge along the row axis with
//!   deterministic column zero-padding
//! - **Instrument-grid resampling**: nearest-neighbor for shared
//!   coordinates, per-slice cubic for drift-corrected ones
//!
//! ## Architecture
//!
//! - **Registry/Dispatcher**: capability tables and provider selection
//! - **Loader**: read orchestration, stitching, post-load resampling
//! - **Interpolation**: scattered-data resampling onto uniform grids

pub mod config;
pub mod error;
pub mod interpolation;
pub mod loader;
pub mod logging;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod stack;

pub use config::Config;
pub use error::{Result, StaxError};
pub use loader::{get_file_structure, load, save, LoadOutcome};
pub use logging::{
    init_tracing, log_error, log_load_stats, log_operation_end, log_operation_start,
    log_timed_operation,
};
pub use provider::{
    Action, DataType, FileProvider, FileStructure, Selection, StructureEntry, ACTIONS, DATA_TYPES,
};
pub use registry::Registry;
pub use stack::{AttributeValue, CoordArray, ImageStack};
