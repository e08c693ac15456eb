use actix_web::http::StatusCode;
use std::fmt;
use std::io;

/// Failure while reading or writing the users file.
#[derive(Debug)]
pub enum StoreError {
    Read(io::Error),
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
    Write(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read(e) => write!(f, "Failed to read users file: {}", e),
            StoreError::Parse(e) => write!(f, "Failed to parse users file: {}", e),
            StoreError::Serialize(e) => write!(f, "Failed to serialize users: {}", e),
            StoreError::Write(e) => write!(f, "Failed to write users file: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Read(e) | StoreError::Write(e) => Some(e),
            StoreError::Parse(e) | StoreError::Serialize(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    MissingField,
    EmailExists,
    InvalidCredentials,
    Store(StoreError),
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField => StatusCode::BAD_REQUEST,
            AppError::EmailExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingField => write!(f, "Email and password are required."),
            AppError::EmailExists => write!(f, "Email already registered."),
            AppError::InvalidCredentials => write!(f, "Invalid credentials."),
            AppError::Store(e) => write!(f, "Store error: {}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// Invalid startup configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmailExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);

        let store = AppError::from(StoreError::Read(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_keeps_source() {
        use std::error::Error;

        let err = AppError::Store(StoreError::Write(io::Error::new(io::ErrorKind::Other, "disk full")));
        let source = err.source().and_then(|s| s.source()).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk full"));
    }
}
