//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Context Expansion Core
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// The referenced file could not be found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested
        path: String,
    },

    /// A requested line range fell outside the file's bounds
    #[error("Line out of range in {path}: requested start {start}, file has {available} lines")]
    LineOutOfRange {
        /// Path of the file that was read
        path: String,
        /// Requested start line (1-indexed)
        start: usize,
        /// Number of lines actually available
        available: usize,
    },

    /// Neither a symbol name nor a line range was supplied for a reference
    #[error("Underspecified reference: {path} has neither a symbol name nor a line range")]
    UnderspecifiedRef {
        /// Path of the offending reference
        path: String,
    },

    /// A manifest failed JSON parsing or invariant validation
    #[error("Invalid manifest: {message}")]
    InvalidManifest {
        /// Description of the validation failure
        message: String,
    },

    /// The symbol index was not supplied or is unusable for this request
    #[error("Symbol index unavailable: {message}")]
    IndexUnavailable {
        /// Description of why the index could not be used
        message: String,
    },

    /// A background indexing operation failed
    #[error("Indexing failed: {message}")]
    IndexingFailed {
        /// Error message reported by the indexer
        message: String,
    },

    /// A waiter timed out before the awaited condition was reached
    #[error("Timed out waiting for {what}")]
    Timeout {
        /// Description of what was being waited for
        what: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create a file-not-found error
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a line-out-of-range error
    pub fn line_out_of_range<S: Into<String>>(path: S, start: usize, available: usize) -> Self {
        Self::LineOutOfRange {
            path: path.into(),
            start,
            available,
        }
    }

    /// Create an underspecified-reference error
    pub fn underspecified_ref<S: Into<String>>(path: S) -> Self {
        Self::UnderspecifiedRef { path: path.into() }
    }

    /// Create an invalid-manifest error
    pub fn invalid_manifest<S: Into<String>>(message: S) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Create an index-unavailable error
    pub fn index_unavailable<S: Into<String>>(message: S) -> Self {
        Self::IndexUnavailable {
            message: message.into(),
        }
    }

    /// Create an indexing-failed error
    pub fn indexing_failed<S: Into<String>>(message: S) -> Self {
        Self::IndexingFailed {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(what: S) -> Self {
        Self::Timeout { what: what.into() }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an I/O error with a message and no source
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }
}
