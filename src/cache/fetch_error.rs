//! Clasificación de errores de fetch
//!
//! El cache solo reintenta errores transitorios de red. Los errores de
//! permisos o validación fallan inmediatamente sin reintento.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clase de error de un fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Error transitorio de red, se reintenta
    Network,
    /// Timeout del intento, se trata como error de red
    Timeout,
    /// Permiso denegado por el data store, no se reintenta
    Permission,
    /// Cualquier otro error, no se reintenta
    Internal,
}

/// Error producido por un fetcher del cache
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self { kind: FetchErrorKind::Network, message: message.into() }
    }

    pub fn timeout(key: &str) -> Self {
        Self {
            kind: FetchErrorKind::Timeout,
            message: format!("fetch timeout para la clave '{}'", key),
        }
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self { kind: FetchErrorKind::Permission, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { kind: FetchErrorKind::Internal, message: message.into() }
    }

    /// Clasificar por el texto del mensaje: "fetch" o "network"
    /// (case-insensitive) se consideran errores de red.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let kind = if lower.contains("fetch") || lower.contains("network") {
            FetchErrorKind::Network
        } else if lower.contains("permission") || lower.contains("denied") {
            FetchErrorKind::Permission
        } else {
            FetchErrorKind::Internal
        };
        Self { kind, message }
    }

    /// Solo los errores de clase red (incluye timeout) se reintentan
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Network | FetchErrorKind::Timeout)
    }
}

impl From<sqlx::Error> for FetchError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                FetchError::network(format!("network error: {}", e))
            }
            sqlx::Error::Database(db) if db.code().as_deref() == Some("42501") => {
                // insufficient_privilege
                FetchError::permission(e.to_string())
            }
            _ => FetchError::internal(e.to_string()),
        }
    }
}

impl From<crate::utils::errors::AppError> for FetchError {
    fn from(e: crate::utils::errors::AppError) -> Self {
        use crate::utils::errors::AppError;
        match e {
            AppError::Database(inner) => inner.into(),
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) => {
                FetchError::permission(msg)
            }
            AppError::ExternalApi(msg) => FetchError::network(msg),
            other => FetchError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_classification() {
        assert_eq!(FetchError::from_message("Failed to fetch").kind, FetchErrorKind::Network);
        assert_eq!(FetchError::from_message("NETWORK unreachable").kind, FetchErrorKind::Network);
        assert_eq!(
            FetchError::from_message("permission denied for table vehicles").kind,
            FetchErrorKind::Permission
        );
        assert_eq!(FetchError::from_message("boom").kind, FetchErrorKind::Internal);
    }

    #[test]
    fn test_retryable() {
        assert!(FetchError::network("x").is_retryable());
        assert!(FetchError::timeout("vehicles").is_retryable());
        assert!(!FetchError::permission("x").is_retryable());
        assert!(!FetchError::internal("x").is_retryable());
    }
}
