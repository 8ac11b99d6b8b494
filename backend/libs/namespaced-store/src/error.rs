//! Error types for store operations

use thiserror::Error;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Redis connection or command error
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Value serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller supplied arguments the command cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// True when Redis rejected the command because of the stored value
    /// (non-integer counter, wrong data type under the key, ...)
    pub fn is_value_error(&self) -> bool {
        match self {
            StoreError::Redis(err) => matches!(
                err.kind(),
                redis::ErrorKind::ResponseError
                    | redis::ErrorKind::TypeError
                    | redis::ErrorKind::ExtensionError
            ),
            _ => false,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidArgument("at least one key is required".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: at least one key is required"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<String>("invalid json").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(!err.is_value_error());
    }

    #[test]
    fn test_value_error_classification() {
        let err: StoreError = redis::RedisError::from((
            redis::ErrorKind::ResponseError,
            "An error was signalled by the server",
            "value is not an integer or out of range".to_string(),
        ))
        .into();
        assert!(err.is_value_error());

        let err: StoreError =
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into();
        assert!(!err.is_value_error());
    }
}
