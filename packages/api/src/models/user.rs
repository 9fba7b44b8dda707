//! # Owner model for authenticated users
//!
//! Defines the two representations of a dashboard owner:
//!
//! ## [`User`] (server only)
//!
//! The complete database row from the `users` table, loaded via [`sqlx::FromRow`]:
//!
//! - `id`: primary key (`UUID v4`); this is the owner id stamped on every lead
//!   and campaign.
//! - `email`: trimmed, lower-cased, unique.
//! - `company`: captured at sign-up.
//! - `password_hash`: Argon2 PHC string.
//! - `joined_at`: set once at sign-up; the record is otherwise immutable.
//!
//! ## [`UserInfo`]
//!
//! A client-safe subset that can cross the server/client boundary via Dioxus
//! server functions. It omits the password hash and converts the `Uuid` to a
//! `String` so it works in WASM.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub company: String,
    pub password_hash: String,
    pub joined_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            company: self.company.clone(),
            joined_at: self.joined_at.to_rfc3339(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub company: String,
    /// RFC 3339 timestamp.
    pub joined_at: String,
}

impl UserInfo {
    /// Get display name, falling back to email if the company is blank.
    pub fn display_name(&self) -> &str {
        if self.company.trim().is_empty() {
            &self.email
        } else {
            &self.company
        }
    }

    /// First letter of the display name, upper-cased, for avatar badges.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(company: &str) -> UserInfo {
        UserInfo {
            id: "0b8e6d1c-3f0e-4c2a-9b1e-7f5f6a2d9c10".to_string(),
            email: "jane@acme.test".to_string(),
            company: company.to_string(),
            joined_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_display_name_prefers_company() {
        assert_eq!(info("acme").display_name(), "acme");
        assert_eq!(info("acme").initial(), "A");
        assert_eq!(info(" ").display_name(), "jane@acme.test");
    }
}
