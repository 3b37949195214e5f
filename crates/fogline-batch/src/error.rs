//! Error types for the batch layer.

use std::error::Error;
use std::fmt;
use std::io;

use fogline_core::{ConfigError, ConsolidateError, DriverError, ExtractError};
use fogline_schema::SchemaError;

/// Why one replay failed. Caught at the batch loop boundary; the
/// replay's output directory is purged and the batch continues.
#[derive(Debug)]
pub enum ReplayFailure {
    /// The driver could not produce the replay's metadata record.
    Metadata(DriverError),
    /// A perspective run failed.
    Extract(ExtractError),
    /// The two runs violated a consolidation invariant.
    Consolidate(ConsolidateError),
    /// Normalization or persistence failed.
    Schema(SchemaError),
}

impl fmt::Display for ReplayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata(e) => write!(f, "metadata: {e}"),
            Self::Extract(e) => write!(f, "extraction: {e}"),
            Self::Consolidate(e) => write!(f, "consolidation: {e}"),
            Self::Schema(e) => write!(f, "schema: {e}"),
        }
    }
}

impl Error for ReplayFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Metadata(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Consolidate(e) => Some(e),
            Self::Schema(e) => Some(e),
        }
    }
}

impl From<ExtractError> for ReplayFailure {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

impl From<ConsolidateError> for ReplayFailure {
    fn from(e: ConsolidateError) -> Self {
        Self::Consolidate(e)
    }
}

impl From<SchemaError> for ReplayFailure {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

/// Errors that stop the whole batch, not just one replay.
#[derive(Debug)]
pub enum BatchError {
    /// The extraction configuration is invalid.
    Config(ConfigError),
    /// Replay discovery failed (directory unreadable).
    Io(io::Error),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for BatchError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
