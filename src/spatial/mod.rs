//! Spatial data structures for wave state and neighborhoods
//!
//! This module contains spatial-related functionality including:
//! - Topology definitions and neighbor arithmetic
//! - Wave state management and snapshots

/// Topology definitions and neighbor arithmetic
pub mod topology;
/// Wave state management and snapshot support
pub mod wave;

pub use wave::Wave;
