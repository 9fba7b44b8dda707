//! Identity-gate and configuration errors.
//!
//! Persistence failures use [`store::StoreError`]; everything here concerns who
//! the caller is. Server functions turn both into `ServerFnError` display
//! strings with [`to_server_error`].

use dioxus::prelude::ServerFnError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    DuplicateAccount,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Session error: {0}")]
    Session(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for AuthError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AuthError::Session(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("Invalid config file {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

pub fn to_server_error(err: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(err.to_string())
}
