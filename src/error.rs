//! Error types and handling for the Closet Muse backend

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the Closet Muse backend
#[derive(Error, Debug)]
pub enum ClosetMuseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Wardrobe storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// SQLite errors
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClosetMuseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// HTTP status the error maps to when it reaches a handler
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClosetMuseError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClosetMuseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            ClosetMuseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ClosetMuseError::Storage { .. } | ClosetMuseError::Database { .. } => {
                "Could not access the wardrobe store. Please try again later.".to_string()
            }
            ClosetMuseError::Io { .. } => {
                "File operation failed. Please check upload directory permissions.".to_string()
            }
        }
    }
}

impl IntoResponse for ClosetMuseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(json!({ "detail": self.user_message() }))).into_response()
    }
}
