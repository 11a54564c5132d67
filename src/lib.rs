//! Core library for the report-aligner command line application.
//!
//! The library exposes the batch pipeline that powers the command-line
//! interface as well as the unit tests. The modules are structured to keep
//! responsibilities narrow and composable: IO adapters live under [`io`],
//! data representations inside [`model`], the tree flattening logic in
//! [`flatten`], column normalization and projection in [`columns`], row
//! aggregation in [`aggregate`], and the batch orchestration under
//! [`align`].

pub mod aggregate;
pub mod align;
pub mod columns;
pub mod error;
pub mod flatten;
pub mod io;
pub mod model;

pub use error::{Result, ToolError};
