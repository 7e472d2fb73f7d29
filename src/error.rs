//! Error types for Repeatr
//!
//! Centralized error handling using thiserror. The repeat engine itself never
//! fails; these cover the surfaces around it (clipboard, config, terminal).

use thiserror::Error;

/// All error types that can occur in Repeatr
#[derive(Debug, Error)]
pub enum RepeatrError {
    /// Clipboard sink rejected or failed to store the text
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Configuration value out of range
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Repeatr operations
pub type Result<T> = std::result::Result<T, RepeatrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error() {
        let err = RepeatrError::Clipboard("payload too large".to_string());
        assert_eq!(err.to_string(), "Clipboard error: payload too large");
    }

    #[test]
    fn test_config_error() {
        let err = RepeatrError::Config("tick_period_ms must be positive".to_string());
        assert_eq!(err.to_string(), "Config error: tick_period_ms must be positive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: RepeatrError = io_err.into();
        assert!(matches!(err, RepeatrError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<usize> {
            Ok(3)
        }

        fn returns_err() -> Result<usize> {
            Err(RepeatrError::Config("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
