//! Error types for linechat
//!
//! Provides a unified error type used across all linechat crates.

use std::path::PathBuf;

/// Main error type for linechat operations
#[derive(Debug, thiserror::Error)]
pub enum LinechatError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Connection Errors ===

    #[error("Failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        source: std::io::Error,
    },

    #[error("Connection failed: {0}")]
    Connection(String),

    // === Protocol Errors ===

    #[error("Short write: {written} of {expected} bytes accepted")]
    ShortWrite { written: usize, expected: usize },

    // === Terminal Errors ===

    #[error("Input error: {0}")]
    Input(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinechatError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a terminal input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means the peer went away rather than a local fault
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}

/// Result type alias using LinechatError
pub type Result<T> = std::result::Result<T, LinechatError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display Tests ====================

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = LinechatError::Io(io_err);
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = LinechatError::FileWrite {
            path: PathBuf::from("/root/linechat.log"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write file"));
        assert!(msg.contains("/root/linechat.log"));
    }

    #[test]
    fn test_error_display_resolve() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "no such host");
        let err = LinechatError::Resolve {
            host: "chat.invalid".into(),
            source: io_err,
        };
        assert_eq!(err.to_string(), "Failed to resolve chat.invalid: no such host");
    }

    #[test]
    fn test_error_display_connection() {
        let err = LinechatError::Connection("refused".into());
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_error_display_short_write() {
        let err = LinechatError::ShortWrite {
            written: 3,
            expected: 10,
        };
        assert_eq!(err.to_string(), "Short write: 3 of 10 bytes accepted");
    }

    #[test]
    fn test_error_display_config_invalid() {
        let err = LinechatError::ConfigInvalid {
            path: PathBuf::from("/home/user/.config/linechat/config.toml"),
            message: "syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("config.toml"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn test_error_display_config_not_found() {
        let err = LinechatError::ConfigNotFound(PathBuf::from("/missing/config.toml"));
        assert!(err.to_string().contains("/missing/config.toml"));
    }

    // ==================== Disconnect Tests ====================

    #[test]
    fn test_is_disconnect() {
        let pipe = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert!(LinechatError::Io(pipe).is_disconnect());

        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(LinechatError::Io(reset).is_disconnect());

        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(LinechatError::Io(eof).is_disconnect());
    }

    #[test]
    fn test_not_disconnect_errors() {
        let local = [
            LinechatError::Connection("refused".into()),
            LinechatError::ShortWrite { written: 0, expected: 1 },
            LinechatError::Input("eof".into()),
            LinechatError::Config("bad".into()),
            LinechatError::Internal("oops".into()),
            LinechatError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "x")),
        ];

        for err in local {
            assert!(!err.is_disconnect(), "Expected {:?} to NOT be a disconnect", err);
        }
    }

    // ==================== Helper Function Tests ====================

    #[test]
    fn test_connection_helper() {
        let err = LinechatError::connection("connection refused");
        assert!(matches!(err, LinechatError::Connection(_)));
        assert_eq!(err.to_string(), "Connection failed: connection refused");
    }

    #[test]
    fn test_input_helper() {
        let err = LinechatError::input("end of input before pseudo");
        assert!(matches!(err, LinechatError::Input(_)));
        assert_eq!(err.to_string(), "Input error: end of input before pseudo");
    }

    #[test]
    fn test_config_helper() {
        let err = LinechatError::config("missing required field 'pseudo'");
        assert!(err.to_string().contains("missing required field"));
    }

    #[test]
    fn test_internal_helper() {
        let err = LinechatError::internal("invariant violated");
        assert_eq!(err.to_string(), "Internal error: invariant violated");
    }

    // ==================== From Trait Tests ====================

    #[test]
    fn test_from_io_error_preserves_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LinechatError = io_err.into();
        if let LinechatError::Io(inner) = err {
            assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied);
        } else {
            panic!("Expected Io variant");
        }
    }
}
