//! Built-in file-format providers.
//!
//! Real instrument formats live in external provider crates; this module
//! only carries the small formats the crate itself ships, currently the
//! plain-text stack format used by the CLI and the test suite.

pub mod text;

pub use text::TextStackProvider;
