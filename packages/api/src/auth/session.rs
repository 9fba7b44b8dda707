//! Session keys and owner resolution.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AuthError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in owner's id, if any.
pub async fn current_owner(session: &Session) -> Result<Option<Uuid>, AuthError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    match user_id {
        Some(id) => Uuid::parse_str(&id)
            .map(Some)
            .map_err(|e| AuthError::Session(e.to_string())),
        None => Ok(None),
    }
}

/// The signed-in owner's id, or [`AuthError::NotAuthenticated`].
///
/// Every record operation derives its owner from here; no server function
/// accepts an owner id from the client.
pub async fn require_owner(session: &Session) -> Result<Uuid, AuthError> {
    current_owner(session)
        .await?
        .ok_or(AuthError::NotAuthenticated)
}

/// Bind the session to `owner`. The session id is cycled first so a
/// pre-login id cannot be reused.
pub async fn sign_in_session(session: &Session, owner: Uuid) -> Result<(), AuthError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, owner.to_string())
        .await?;
    Ok(())
}
