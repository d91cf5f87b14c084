//! Error types for the resource index
//!
//! Centralized error handling using thiserror. The index itself never fails;
//! these errors come from configuration, scanning and parsing.

use thiserror::Error;

/// Main error type for resource indexing
#[derive(Error, Debug)]
pub enum ResError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Invalid resource folder: {0}")]
    InvalidFolder(String),

    #[error("Invalid resource file name: {0}")]
    InvalidName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cancelled")]
    Cancelled,
}

/// Result type alias for resource operations
pub type Result<T> = std::result::Result<T, ResError>;

impl ResError {
    /// Check if this error is recoverable
    ///
    /// A cancelled scan or a single bad file leaves the repository usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ResError::Xml(_)
                | ResError::InvalidFolder(_)
                | ResError::InvalidName(_)
                | ResError::Cancelled
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ResError::Io(e) => format!("File operation failed: {}", e),
            ResError::Config(msg) => format!("Configuration error: {}", msg),
            ResError::InvalidFolder(name) => {
                format!("'{}' is not a valid resource folder name", name)
            }
            ResError::NotFound(msg) => format!("Not found: {}", msg),
            ResError::Cancelled => "Operation was cancelled".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        assert!(ResError::Cancelled.is_recoverable());
        assert!(ResError::Xml("bad".into()).is_recoverable());
        assert!(!ResError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_user_message() {
        let err = ResError::InvalidFolder("values-zz-bogus".into());
        assert_eq!(
            err.user_message(),
            "'values-zz-bogus' is not a valid resource folder name"
        );
        assert_eq!(ResError::Cancelled.user_message(), "Operation was cancelled");
    }
}
