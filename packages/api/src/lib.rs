//! # API crate: fullstack server functions for Lead Desk
//!
//! Defines every Dioxus server function the web front end calls, plus the
//! server-side modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Argon2 password hashing, sign-up validation, session-to-owner resolution |
//! | [`config`] | `server` | `leaddesk.toml` + environment configuration |
//! | [`db`] | `server` | PostgreSQL pool and the owner-scoped [`db::PgStore`] |
//! | [`error`] | `server` | `AuthError` / `ConfigError` |
//! | [`models`] | none | `User` row and its client-safe projection `UserInfo` |
//! | [`sheets`] | `server` | Spreadsheet service client |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, compiled
//! twice: once with the server logic (behind `#[cfg(feature = "server")]`) and
//! once as a thin client stub that forwards the call over HTTP.
//!
//! - **Identity**: `get_current_user`, `register`, `login_password`, `logout`
//! - **Leads**: `get_leads`, `add_lead`, `delete_lead`
//! - **Campaigns**: `get_campaigns`, `add_campaign`, `update_campaign`, `delete_campaign`
//! - **Overview**: `get_analytics`, `import_sheet_leads`
//!
//! Record operations never take an owner id from the client: the owner is
//! always the user bound to the request's session.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod sheets;

pub use models::UserInfo;
pub use store::{
    Analytics, Campaign, CampaignStatus, CampaignUpdate, Lead, NewCampaign, NewLead, SheetLead,
};

#[cfg(feature = "server")]
use error::{to_server_error, AuthError};

/// Resolve the session's owner and open a repository for them.
#[cfg(feature = "server")]
async fn owner_repository(
    session: &tower_sessions::Session,
) -> Result<(String, store::Repository<db::PgStore>), ServerFnError> {
    let owner = auth::require_owner(session)
        .await
        .map_err(to_server_error)?;
    let repo = db::repository().await.map_err(to_server_error)?;
    Ok((owner.to_string(), repo))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(owner) = auth::current_owner(&session)
        .await
        .map_err(to_server_error)?
    else {
        return Ok(None);
    };

    let pool = get_pool().await.map_err(to_server_error)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(owner)
        .fetch_optional(pool)
        .await
        .map_err(to_server_error)?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(to_server_error)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Create an owner account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    company: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let form = auth::validate_sign_up(&email, &password, &company).map_err(to_server_error)?;

    let pool = get_pool().await.map_err(to_server_error)?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&form.email)
        .fetch_optional(pool)
        .await
        .map_err(to_server_error)?;

    if existing.is_some() {
        tracing::warn!("sign-up rejected: duplicate email");
        return Err(to_server_error(AuthError::DuplicateAccount));
    }

    let password_hash = auth::hash_password(&password).map_err(to_server_error)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, company, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&form.email)
    .bind(&form.company)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        // Lost a race with a concurrent sign-up for the same email.
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            to_server_error(AuthError::DuplicateAccount)
        }
        e => to_server_error(e),
    })?;

    auth::sign_in_session(&session, user.id)
        .await
        .map_err(to_server_error)?;

    tracing::info!(owner = %user.id, "owner registered");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    company: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();

    let pool = get_pool().await.map_err(to_server_error)?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(to_server_error)?;

    let Some(user) = user else {
        auth::verify_unknown_account(&password);
        tracing::warn!("sign-in rejected: unknown email");
        return Err(to_server_error(AuthError::InvalidCredentials));
    };

    if !auth::verify_password(&password, &user.password_hash).map_err(to_server_error)? {
        tracing::warn!(owner = %user.id, "sign-in rejected: wrong password");
        return Err(to_server_error(AuthError::InvalidCredentials));
    }

    auth::sign_in_session(&session, user.id)
        .await
        .map_err(to_server_error)?;

    tracing::info!(owner = %user.id, "owner signed in");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The signed-in owner's leads, newest first.
#[cfg(feature = "server")]
#[get("/api/leads", session: tower_sessions::Session)]
pub async fn get_leads() -> Result<Vec<Lead>, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    repo.get_leads(&owner).await.map_err(to_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/leads")]
pub async fn get_leads() -> Result<Vec<Lead>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Store a new lead for the signed-in owner.
#[cfg(feature = "server")]
#[post("/api/leads/add", session: tower_sessions::Session)]
pub async fn add_lead(lead: NewLead) -> Result<Lead, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    let lead = repo.add_lead(&owner, lead).await.map_err(to_server_error)?;
    tracing::info!(owner = %owner, lead = %lead.id, "lead added");
    Ok(lead)
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/add")]
pub async fn add_lead(lead: NewLead) -> Result<Lead, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete one of the signed-in owner's leads.
#[cfg(feature = "server")]
#[post("/api/leads/delete", session: tower_sessions::Session)]
pub async fn delete_lead(id: String) -> Result<(), ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    repo.delete_lead(&owner, &id).await.map_err(to_server_error)?;
    tracing::info!(owner = %owner, lead = %id, "lead deleted");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/delete")]
pub async fn delete_lead(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The signed-in owner's campaigns, newest first.
#[cfg(feature = "server")]
#[get("/api/campaigns", session: tower_sessions::Session)]
pub async fn get_campaigns() -> Result<Vec<Campaign>, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    repo.get_campaigns(&owner).await.map_err(to_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/campaigns")]
pub async fn get_campaigns() -> Result<Vec<Campaign>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a campaign for the signed-in owner.
#[cfg(feature = "server")]
#[post("/api/campaigns/add", session: tower_sessions::Session)]
pub async fn add_campaign(campaign: NewCampaign) -> Result<Campaign, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    let campaign = repo
        .add_campaign(&owner, campaign)
        .await
        .map_err(to_server_error)?;
    tracing::info!(owner = %owner, campaign = %campaign.id, "campaign added");
    Ok(campaign)
}

#[cfg(not(feature = "server"))]
#[post("/api/campaigns/add")]
pub async fn add_campaign(campaign: NewCampaign) -> Result<Campaign, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Partially update one of the signed-in owner's campaigns.
#[cfg(feature = "server")]
#[post("/api/campaigns/update", session: tower_sessions::Session)]
pub async fn update_campaign(
    id: String,
    update: CampaignUpdate,
) -> Result<Campaign, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    let campaign = repo
        .update_campaign(&owner, &id, update)
        .await
        .map_err(to_server_error)?;
    tracing::info!(owner = %owner, campaign = %campaign.id, status = %campaign.status, "campaign updated");
    Ok(campaign)
}

#[cfg(not(feature = "server"))]
#[post("/api/campaigns/update")]
pub async fn update_campaign(
    id: String,
    update: CampaignUpdate,
) -> Result<Campaign, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete one of the signed-in owner's campaigns.
#[cfg(feature = "server")]
#[post("/api/campaigns/delete", session: tower_sessions::Session)]
pub async fn delete_campaign(id: String) -> Result<(), ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    repo.delete_campaign(&owner, &id)
        .await
        .map_err(to_server_error)?;
    tracing::info!(owner = %owner, campaign = %id, "campaign deleted");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/campaigns/delete")]
pub async fn delete_campaign(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overview counters for the signed-in owner.
#[cfg(feature = "server")]
#[get("/api/analytics", session: tower_sessions::Session)]
pub async fn get_analytics() -> Result<Analytics, ServerFnError> {
    let (owner, repo) = owner_repository(&session).await?;
    repo.get_analytics(&owner).await.map_err(to_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/analytics")]
pub async fn get_analytics() -> Result<Analytics, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Rows from the configured spreadsheet. Empty when no spreadsheet is configured.
#[cfg(feature = "server")]
#[get("/api/sheets/leads", session: tower_sessions::Session)]
pub async fn import_sheet_leads() -> Result<Vec<SheetLead>, ServerFnError> {
    auth::require_owner(&session)
        .await
        .map_err(to_server_error)?;

    let config = config::get_config().await.map_err(to_server_error)?;
    let Some(client) = sheets::SheetsClient::shared(&config.sheets)
        .await
        .map_err(to_server_error)?
    else {
        tracing::debug!("spreadsheet import not configured");
        return Ok(Vec::new());
    };

    client.read_leads().await.map_err(|e| {
        tracing::error!("spreadsheet import failed: {}", e);
        to_server_error(e)
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/sheets/leads")]
pub async fn import_sheet_leads() -> Result<Vec<SheetLead>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
