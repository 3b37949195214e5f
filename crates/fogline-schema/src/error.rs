//! Error types for schema normalization and persistence.

use std::fmt;
use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// A value fell outside its target storage type's range.
///
/// Carries enough context to identify the offending column and value in
/// batch logs without re-running the extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastError {
    /// Column being narrowed.
    pub column: &'static str,
    /// The offending value, stringified.
    pub value: String,
    /// Target storage type name.
    pub target: &'static str,
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}': value {} does not fit {}",
            self.column, self.value, self.target
        )
    }
}

impl std::error::Error for CastError {}

/// Errors from schema normalization or artifact persistence.
#[derive(Debug)]
pub enum SchemaError {
    /// A checked narrowing cast failed.
    Cast(CastError),
    /// Arrow array or batch construction failed.
    Arrow(ArrowError),
    /// Parquet encoding failed.
    Parquet(ParquetError),
    /// Sidecar serialization failed.
    Json(serde_json::Error),
    /// Filesystem error while writing artifacts.
    Io(io::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cast(e) => write!(f, "cast failed: {e}"),
            Self::Arrow(e) => write!(f, "arrow error: {e}"),
            Self::Parquet(e) => write!(f, "parquet error: {e}"),
            Self::Json(e) => write!(f, "sidecar serialization error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cast(e) => Some(e),
            Self::Arrow(e) => Some(e),
            Self::Parquet(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<CastError> for SchemaError {
    fn from(e: CastError) -> Self {
        Self::Cast(e)
    }
}

impl From<ArrowError> for SchemaError {
    fn from(e: ArrowError) -> Self {
        Self::Arrow(e)
    }
}

impl From<ParquetError> for SchemaError {
    fn from(e: ParquetError) -> Self {
        Self::Parquet(e)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for SchemaError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
