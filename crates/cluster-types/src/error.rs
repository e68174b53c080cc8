//! Parse errors for operator-supplied literals

use thiserror::Error;

/// Error returned by the converters in [`crate::convert`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Cannot parse empty {0}")]
    Empty(&'static str),
    #[error("Cannot parse '{0}'. Invalid format!")]
    InvalidShard(String),
    #[error("Unknown storage state: {0}")]
    UnknownStorageState(String),
    #[error("Unknown location scope: {0}")]
    UnknownLocationScope(String),
}
