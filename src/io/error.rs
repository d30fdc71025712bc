//! Error types and context management for generation operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Generation parameter validation failed
    Configuration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Output assembly invoked on a wave that is not fully collapsed
    ///
    /// Indicates a caller bug: assembly requires every cell domain to be
    /// a singleton.
    IncompleteWave {
        /// Flat index of the first offending cell
        cell: usize,
        /// Number of patterns still possible at that cell
        remaining: usize,
    },

    /// Repeated contradictions exhausted the restart budget
    DeadlockExceeded {
        /// Restarts performed before giving up
        restarts: usize,
        /// Observation attempts across all restarts
        attempts: usize,
    },

    /// Failed to load sample image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::IncompleteWave { cell, remaining } => {
                write!(
                    f,
                    "Wave is not fully collapsed: cell {cell} still has {remaining} candidate patterns"
                )
            }
            Self::DeadlockExceeded { restarts, attempts } => {
                write!(
                    f,
                    "Generation deadlocked after {restarts} restarts ({attempts} observation attempts)"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Enriches errors converted through `From` with call-site information
pub trait WithContext<T> {
    /// Attach the file path involved in the failed operation
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied where the
    /// variant carries one
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach a description of the operation being performed
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation applied where the
    /// variant carries one
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let AlgorithmError::ImageLoad { path: target, .. }
            | AlgorithmError::ImageExport { path: target, .. }
            | AlgorithmError::FileSystem { path: target, .. } = &mut error
            {
                *target = path.to_path_buf();
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let AlgorithmError::FileSystem {
                operation: target, ..
            } = &mut error
            {
                *target = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a configuration error
pub fn configuration_error(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::Configuration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
