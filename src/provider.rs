//! The capability contract implemented by every file-format provider.
//!
//! A provider handles one file format family. It declares the extensions it
//! claims, the data-type categories it can read and write, and exposes a
//! cheap content probe alongside the actual read/write/structure operations.
//! The registry consumes nothing beyond this trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Result, StaxError};
use crate::stack::ImageStack;

/// The operations a provider can support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Loading data from a file
    Read,
    /// Writing data to a file
    Write,
}

/// All actions, in the order support tables are built
pub const ACTIONS: [Action; 2] = [Action::Read, Action::Write];

/// The closed set of data-type categories providers declare support for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// A single spectrum
    Spectrum,
    /// A single 2D image
    Image,
    /// A 3D image stack
    Stack,
    /// Analysis results
    Results,
}

/// All data types, in the order support tables are built
pub const DATA_TYPES: [DataType; 4] = [
    DataType::Spectrum,
    DataType::Image,
    DataType::Stack,
    DataType::Results,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Write => write!(f, "write"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Spectrum => write!(f, "spectrum"),
            DataType::Image => write!(f, "image"),
            DataType::Stack => write!(f, "stack"),
            DataType::Results => write!(f, "results"),
        }
    }
}

/// One sub-selector within a file: a named entry (e.g. a scan or region)
/// and optionally one of its channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Name of the entry to load
    pub entry: String,
    /// Channel within the entry, when the entry has more than one
    pub channel: Option<String>,
}

impl Selection {
    /// Select an entry by name
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            channel: None,
        }
    }

    /// Select a specific channel of an entry
    pub fn with_channel(entry: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            channel: Some(channel.into()),
        }
    }
}

/// One choosable entry in a file's internal organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureEntry {
    /// Name of the entry
    pub name: String,
    /// Channels available within the entry
    pub channels: Vec<String>,
    /// Data-type category of the entry, when the provider knows it
    pub data_type: Option<DataType>,
}

/// The internal organization of a file's choosable data subsets.
///
/// Providers return `None` instead of a structure when the file contains
/// exactly one unambiguous dataset and no selection is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStructure {
    /// Entries available to choose from, in file order
    pub entries: Vec<StructureEntry>,
}

impl FileStructure {
    /// Whether the file offers more than one dataset to choose from
    pub fn needs_selection(&self) -> bool {
        self.entries.len() > 1 || self.entries.iter().any(|e| e.channels.len() > 1)
    }
}

/// A file-format capability provider.
///
/// Every provider must be able to read; `write` and `structure` are optional
/// capabilities with default implementations (read-only provider, single
/// unambiguous dataset).
pub trait FileProvider: Send + Sync {
    /// Short display name for the provider, unique within a registry
    fn title(&self) -> &str;

    /// Extension glob patterns the provider claims, e.g. `*.hdf5`
    fn extensions(&self) -> &[&str];

    /// Data-type categories the provider can read
    fn read_types(&self) -> &[DataType];

    /// Data-type categories the provider can write
    fn write_types(&self) -> &[DataType] {
        &[]
    }

    /// Cheap content probe: does this file look like this provider's format?
    ///
    /// Must return `false` on well-formed-but-wrong-format input, never fail.
    fn identify(&self, filename: &Path) -> bool;

    /// Populate the stack from the file, optionally restricted to one
    /// selection, with an optional format-specific options blob.
    fn read(
        &self,
        filename: &Path,
        stack: &mut ImageStack,
        selection: Option<&Selection>,
        options: Option<&serde_json::Value>,
    ) -> Result<()>;

    /// Write a data object to the file. Absence means the provider is
    /// read-only.
    fn write(&self, _filename: &Path, _stack: &ImageStack, _data_type: DataType) -> Result<()> {
        Err(StaxError::UnsupportedOperation {
            provider: self.title().to_string(),
            operation: "write".to_string(),
        })
    }

    /// Skim-read the file and describe its choosable data subsets.
    ///
    /// Returns `Ok(None)` when the file contains a single unambiguous
    /// dataset.
    fn structure(&self, _filename: &Path) -> Result<Option<FileStructure>> {
        Ok(None)
    }

    /// Whether the provider's pattern list claims the given extension
    /// (without the leading dot). Matching is ASCII case-insensitive.
    fn handles_extension(&self, ext: &str) -> bool {
        if ext.is_empty() {
            return false;
        }
        let wanted = format!("*.{}", ext.to_ascii_lowercase());
        self.extensions()
            .iter()
            .any(|pattern| pattern.eq_ignore_ascii_case(&wanted))
    }
}
