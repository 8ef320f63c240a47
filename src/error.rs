// src/error.rs

//! Error types shared across the gitdeps library.

use thiserror::Error;

/// Errors that can occur while resolving git dependencies
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Package client error: {0}")]
    ClientError(String),
}

/// Result type for gitdeps operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IoError("read failed".to_string());
        assert_eq!(err.to_string(), "IO error: read failed");

        let err = Error::Config("invalid duration unit: x".to_string());
        assert_eq!(err.to_string(), "Config error: invalid duration unit: x");
    }
}
