use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CatalogError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    // The store could not serve the request right now (throttling, timeouts, 5xx). Nothing in the
    // catalog retries on its own; the caller decides whether to try again.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl CatalogError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> CatalogError {
        CatalogError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> CatalogError {
        CatalogError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> CatalogError {
        CatalogError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> CatalogError {
        if retryable {
            CatalogError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                CatalogError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") || reason_val.as_str().contains("403") {
                CatalogError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                CatalogError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            CatalogError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> CatalogError {
        CatalogError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            CatalogError::Database { retryable, .. } => { *retryable }
            CatalogError::AccessDenied { .. } => { false }
            CatalogError::NotFound { .. } => { false }
            CatalogError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            CatalogError::Validation { .. } => { false }
            CatalogError::Serialization { .. } => { false }
            CatalogError::Runtime { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            CatalogError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            CatalogError::NotFound { message } => {
                write!(f, "{}", message)
            }
            CatalogError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            CatalogError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            CatalogError::Serialization { message } => {
                write!(f, "{}", message)
            }
            CatalogError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// A specialized Result type for catalog and repository operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use crate::core::library::CatalogError;

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(CatalogError::database("test", None, false), CatalogError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(CatalogError::access_denied("test", None), CatalogError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(CatalogError::not_found("test"), CatalogError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(CatalogError::validation("test", None), CatalogError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(CatalogError::database_or_unavailable("test", None, true), CatalogError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: true }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("404".to_string()), false), CatalogError::NotFound{ message: _ }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("400".to_string()), false), CatalogError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("403 Forbidden".to_string()), false), CatalogError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("500".to_string()), false), CatalogError::Database{ message: _, reason_code: _, retryable: false }));
        assert!(matches!(CatalogError::database_or_unavailable("test", None, false), CatalogError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!CatalogError::database("test", None, false).retryable());
        assert!(CatalogError::database("test", None, true).retryable());
        assert!(!CatalogError::access_denied("test", None).retryable());
        assert!(!CatalogError::not_found("test").retryable());
        assert!(!CatalogError::unavailable("test", None, false).retryable());
        assert!(CatalogError::unavailable("test", None, true).retryable());
        assert!(!CatalogError::validation("test", None).retryable());
        assert!(!CatalogError::serialization("test").retryable());
        assert!(!CatalogError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_display_message() {
        let err = CatalogError::not_found("no such table");
        assert_eq!("no such table", err.to_string());
        let err: CatalogError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(err, CatalogError::Serialization{ .. }));
    }
}
