//! Unified error type for the nightlight-lib crate.
//!
//! [`NightLightError`] wraps module-specific errors (`StoreError`,
//! `RecordError`) and the string-payload kinds (`Config`, `InvalidArgument`).
//! `From` impls allow `?` to propagate across module boundaries seamlessly.

use std::fmt;

use crate::record::RecordError;
use crate::store::StoreError;

/// Unified error type for nightlight-lib operations.
#[derive(Debug)]
pub enum NightLightError {
    /// Registry access failed (open, read, write).
    Store(StoreError),
    /// A fetched record is too short for the requested operation.
    Record(RecordError),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Rejected command-line input.
    InvalidArgument(String),
}

impl fmt::Display for NightLightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NightLightError::Store(e) => write!(f, "{e}"),
            NightLightError::Record(e) => write!(f, "{e}"),
            NightLightError::Io(e) => write!(f, "I/O error: {e}"),
            NightLightError::Config(e) => write!(f, "Config error: {e}"),
            NightLightError::InvalidArgument(e) => write!(f, "Invalid argument: {e}"),
        }
    }
}

impl std::error::Error for NightLightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NightLightError::Store(e) => Some(e),
            NightLightError::Record(e) => Some(e),
            NightLightError::Io(e) => Some(e),
            NightLightError::Config(_) | NightLightError::InvalidArgument(_) => None,
        }
    }
}

impl From<StoreError> for NightLightError {
    fn from(e: StoreError) -> Self {
        NightLightError::Store(e)
    }
}

impl From<RecordError> for NightLightError {
    fn from(e: RecordError) -> Self {
        NightLightError::Record(e)
    }
}

impl From<std::io::Error> for NightLightError {
    fn from(e: std::io::Error) -> Self {
        NightLightError::Io(e)
    }
}

/// Crate-level Result alias using [`NightLightError`].
pub type Result<T> = std::result::Result<T, NightLightError>;
