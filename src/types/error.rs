use thiserror::Error;

/// screenlog error types
#[derive(Error, Debug)]
pub enum ScreenlogError {
    /// Rejected input (negative hours, empty category, bad date)
    #[error("validation error: {0}")]
    Validation(String),

    /// Database unavailable or schema missing
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ScreenlogError {
    fn from(e: rusqlite::Error) -> Self {
        ScreenlogError::Storage(e.to_string())
    }
}

/// Result type alias for screenlog
pub type Result<T> = std::result::Result<T, ScreenlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScreenlogError::Validation("hours cannot be negative".into());
        assert_eq!(err.to_string(), "validation error: hours cannot be negative");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScreenlogError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_sqlite_error_becomes_storage() {
        let sql_err = rusqlite::Error::InvalidQuery;
        let err: ScreenlogError = sql_err.into();
        assert!(matches!(err, ScreenlogError::Storage(_)));
    }
}
