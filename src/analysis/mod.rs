//! Analysis modules for pattern extraction and adjacency construction

/// Direction-indexed adjacency tables over pattern catalogs
pub mod adjacency;
/// Model construction tying catalogs and adjacency tables together
pub mod model;
/// Pattern types, catalogs, and sample extraction
pub mod patterns;
