//! Wave function collapse for strings and images via overlapping pattern constraints
//!
//! The system extracts fixed-size patterns from a sample, admits two patterns
//! as neighbors only when every window spanning their junction also occurs in
//! the sample, and collapses a wave of cells into new output that is everywhere
//! locally indistinguishable from the sample.

#![forbid(unsafe_code)]

/// Core solver implementation including observation, propagation, and output assembly
pub mod algorithm;
/// Pattern extraction, catalogs, and adjacency analysis of samples
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Wave state and topology management
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
