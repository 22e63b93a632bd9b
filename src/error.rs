// Centralized error handling module
// Provides error types with context for validation and sweep operations

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the hashsweep utility
/// Provides context-rich error messages with paths and operations
#[derive(Debug)]
pub enum HashSweepError {
    /// File system errors with context
    DirectoryNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Algorithm resolution errors
    UnsupportedAlgorithm { algorithm: String },

    /// Sweep configuration errors
    InvalidConfiguration { message: String },

    /// Benchmark run errors
    RunFailed { algorithm: String, thread_count: usize, reason: String },
    RunTimedOut { algorithm: String, thread_count: usize, seconds: u64 },
}

impl fmt::Display for HashSweepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // File system errors
            HashSweepError::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}\n", path.display())?;
                write!(f, "Suggestion: Check that the directory path is correct and the directory exists")
            }
            HashSweepError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} {}\n", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            HashSweepError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "I/O error while {}: {}\n", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }

            // Algorithm resolution errors
            HashSweepError::UnsupportedAlgorithm { algorithm } => {
                write!(f, "Unsupported hash algorithm: {}\n", algorithm)?;
                write!(f, "Suggestion: Use the 'list' command to see available algorithms")
            }

            // Sweep configuration errors
            HashSweepError::InvalidConfiguration { message } => {
                write!(f, "Invalid sweep configuration: {}\n", message)?;
                write!(f, "Suggestion: Run with --help to see usage information")
            }

            // Benchmark run errors
            HashSweepError::RunFailed { algorithm, thread_count, reason } => {
                write!(f, "Benchmark run failed for {} at {} threads: {}\n", algorithm, thread_count, reason)?;
                write!(f, "Suggestion: Check the run's output directory for partial results")
            }
            HashSweepError::RunTimedOut { algorithm, thread_count, seconds } => {
                write!(f, "Benchmark run for {} at {} threads did not finish within {}s\n", algorithm, thread_count, seconds)?;
                write!(f, "Suggestion: Increase the per-run timeout or shorten the phase durations")
            }
        }
    }
}

impl std::error::Error for HashSweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashSweepError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Conversion from io::Error with context
impl HashSweepError {
    /// Create an IoError with context about the operation and optional path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        // Check for specific error kinds and provide more specific errors
        match err.kind() {
            io::ErrorKind::NotFound => {
                if let Some(p) = path {
                    HashSweepError::DirectoryNotFound { path: p }
                } else {
                    HashSweepError::IoError {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            io::ErrorKind::PermissionDenied => {
                if let Some(p) = path {
                    HashSweepError::PermissionDenied {
                        path: p,
                        operation: operation.to_string(),
                    }
                } else {
                    HashSweepError::IoError {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            _ => HashSweepError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

// Default From implementation for io::Error (without context)
impl From<io::Error> for HashSweepError {
    fn from(err: io::Error) -> Self {
        HashSweepError::from_io_error(err, "unknown operation", None)
    }
}
