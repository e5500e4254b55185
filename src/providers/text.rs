//! Plain-text stack format.
//!
//! A whitespace-separated text format for small stacks: a header line
//! `rows cols slices`, one line of `slices` energy values, then the cube
//! values slice by slice, one row per line. Lines starting with `#` are
//! comments. The file holds exactly one dataset, so `structure` is `None`
//! and selections are ignored.

use ndarray::{Array1, Array3};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, StaxError};
use crate::provider::{DataType, FileProvider, Selection};
use crate::stack::{CoordArray, ImageStack};

const TITLE: &str = "Plain Text Stack";

/// Provider for the plain-text stack format
pub struct TextStackProvider;

impl TextStackProvider {
    fn error(message: impl Into<String>) -> StaxError {
        StaxError::Provider {
            provider: TITLE.to_string(),
            message: message.into(),
        }
    }

    fn parse_tokens(content: &str) -> Vec<&str> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect()
    }
}

impl FileProvider for TextStackProvider {
    fn title(&self) -> &str {
        TITLE
    }

    fn extensions(&self) -> &[&str] {
        &["*.txt", "*.dat"]
    }

    fn read_types(&self) -> &[DataType] {
        &[DataType::Stack, DataType::Image]
    }

    fn write_types(&self) -> &[DataType] {
        &[DataType::Stack]
    }

    fn identify(&self, filename: &Path) -> bool {
        // Probe the first non-comment line for a `rows cols slices` header
        let mut head = [0u8; 256];
        let n = match std::fs::File::open(filename).and_then(|mut f| f.read(&mut head)) {
            Ok(n) => n,
            Err(_) => return false,
        };
        let text = String::from_utf8_lossy(&head[..n]);
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let dims: Vec<usize> = tokens.iter().filter_map(|t| t.parse().ok()).collect();
            return tokens.len() == 3 && dims.len() == 3 && dims.iter().all(|&d| d > 0);
        }
        false
    }

    fn read(
        &self,
        filename: &Path,
        stack: &mut ImageStack,
        _selection: Option<&Selection>,
        _options: Option<&serde_json::Value>,
    ) -> Result<()> {
        let content = std::fs::read_to_string(filename)?;
        let tokens = Self::parse_tokens(&content);

        if tokens.len() < 3 {
            return Err(Self::error("Missing `rows cols slices` header"));
        }
        let dims: Vec<usize> = tokens[..3]
            .iter()
            .map(|t| {
                t.parse::<usize>()
                    .map_err(|_| Self::error(format!("Invalid dimension: {}", t)))
            })
            .collect::<Result<_>>()?;
        let (rows, cols, slices) = (dims[0], dims[1], dims[2]);
        debug!(rows, cols, slices, file = %filename.display(), "Reading text stack");

        let expected = 3 + slices + rows * cols * slices;
        if tokens.len() < expected {
            return Err(Self::error(format!(
                "Truncated file: expected {} values, found {}",
                expected,
                tokens.len()
            )));
        }

        let ev: Vec<f64> = tokens[3..3 + slices]
            .iter()
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| Self::error(format!("Invalid energy value: {}", t)))
            })
            .collect::<Result<_>>()?;

        let mut cube = Array3::zeros((rows, cols, slices));
        let mut it = tokens[3 + slices..expected].iter();
        for s in 0..slices {
            for r in 0..rows {
                for c in 0..cols {
                    let t = it.next().unwrap_or(&"");
                    cube[[r, c, s]] = t
                        .parse::<f32>()
                        .map_err(|_| Self::error(format!("Invalid data value: {}", t)))?;
                }
            }
        }

        stack.absdata = cube;
        stack.ev = Array1::from(ev);
        // The format carries no physical coordinates
        stack.x_dist = Some(CoordArray::indices(rows));
        stack.y_dist = Some(CoordArray::indices(cols));
        stack.x_dist_instr = Some(CoordArray::indices(rows));
        stack.y_dist_instr = Some(CoordArray::indices(cols));
        Ok(())
    }

    fn write(&self, filename: &Path, stack: &ImageStack, data_type: DataType) -> Result<()> {
        if !self.write_types().contains(&data_type) {
            return Err(StaxError::UnsupportedOperation {
                provider: TITLE.to_string(),
                operation: format!("write {}", data_type),
            });
        }
        let (rows, cols, slices) = stack.absdata.dim();

        let mut out = String::new();
        let _ = writeln!(out, "# {} file", TITLE);
        let _ = writeln!(out, "{} {} {}", rows, cols, slices);
        let ev_line: Vec<String> = if stack.ev.len() == slices {
            stack.ev.iter().map(|v| v.to_string()).collect()
        } else {
            (0..slices).map(|i| i.to_string()).collect()
        };
        let _ = writeln!(out, "{}", ev_line.join(" "));
        for s in 0..slices {
            for r in 0..rows {
                let row: Vec<String> = (0..cols)
                    .map(|c| stack.absdata[[r, c, s]].to_string())
                    .collect();
                let _ = writeln!(out, "{}", row.join(" "));
            }
        }
        std::fs::write(filename, out)?;
        Ok(())
    }
}
