//! Shared helpers for the integration tests: a configurable mock provider
//! and text-format fixtures.

use ndarray::{Array1, Array3};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use stax::error::{Result, StaxError};
use stax::providers::TextStackProvider;
use stax::{CoordArray, DataType, FileProvider, ImageStack, Selection};

/// Shape and fill value of one mock dataset
#[derive(Debug, Clone, Copy)]
pub struct MockCube {
    pub rows: usize,
    pub cols: usize,
    pub slices: usize,
    pub fill: f32,
}

impl MockCube {
    pub fn new(rows: usize, cols: usize, slices: usize, fill: f32) -> Self {
        Self {
            rows,
            cols,
            slices,
            fill,
        }
    }
}

/// A provider that synthesizes cubes in memory instead of reading files
pub struct MockProvider {
    title: &'static str,
    extensions: Vec<&'static str>,
    identifies: bool,
    whole_file: MockCube,
    entries: HashMap<String, MockCube>,
}

impl MockProvider {
    pub fn new(title: &'static str, extensions: Vec<&'static str>, identifies: bool) -> Self {
        Self {
            title,
            extensions,
            identifies,
            whole_file: MockCube::new(2, 2, 1, 1.0),
            entries: HashMap::new(),
        }
    }

    pub fn whole_file(mut self, cube: MockCube) -> Self {
        self.whole_file = cube;
        self
    }

    pub fn entry(mut self, name: &str, cube: MockCube) -> Self {
        self.entries.insert(name.to_string(), cube);
        self
    }

    fn populate(&self, stack: &mut ImageStack, cube: MockCube) {
        stack.absdata = Array3::from_elem((cube.rows, cube.cols, cube.slices), cube.fill);
        stack.ev = Array1::from_iter((0..cube.slices).map(|i| i as f64));
        stack.x_dist = Some(CoordArray::indices(cube.rows));
        stack.y_dist = Some(CoordArray::indices(cube.cols));
        stack.x_dist_instr = Some(CoordArray::indices(cube.rows));
        stack.y_dist_instr = Some(CoordArray::indices(cube.cols));
    }
}

impl FileProvider for MockProvider {
    fn title(&self) -> &str {
        self.title
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn read_types(&self) -> &[DataType] {
        &[DataType::Stack, DataType::Image]
    }

    fn identify(&self, _filename: &Path) -> bool {
        self.identifies
    }

    fn read(
        &self,
        _filename: &Path,
        stack: &mut ImageStack,
        selection: Option<&Selection>,
        _options: Option<&serde_json::Value>,
    ) -> Result<()> {
        let cube = match selection {
            None => self.whole_file,
            Some(sel) => *self
                .entries
                .get(&sel.entry)
                .ok_or_else(|| StaxError::Provider {
                    provider: self.title.to_string(),
                    message: format!("No such entry: {}", sel.entry),
                })?,
        };
        self.populate(stack, cube);
        Ok(())
    }
}

/// Write a text-format stack fixture with deterministic values and return
/// the stack that was written.
pub fn write_text_fixture(path: &PathBuf, rows: usize, cols: usize, slices: usize) -> ImageStack {
    let mut stack = ImageStack::new();
    let mut cube = Array3::zeros((rows, cols, slices));
    for r in 0..rows {
        for c in 0..cols {
            for s in 0..slices {
                cube[[r, c, s]] = (r * cols * slices + c * slices + s) as f32;
            }
        }
    }
    stack.absdata = cube;
    stack.ev = Array1::from_iter((0..slices).map(|i| 280.0 + i as f64));

    TextStackProvider
        .write(path, &stack, DataType::Stack)
        .expect("Failed to write text fixture");
    stack
}
