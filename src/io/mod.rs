//! Input/output operations, configuration, and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Algorithm constants and runtime configuration defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG loading and export via palette-labelled grids
pub mod image;
/// Multi-file progress tracking and display
pub mod progress;
/// Sample parsing and output rendering for string generation
pub mod text;
/// Frame capture and GIF generation for collapse visualization
pub mod visualization;
