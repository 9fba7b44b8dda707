//! # Database module: PostgreSQL pool and the owner-scoped document store
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds
//! never pull in SQLx or Tokio networking code.
//!
//! - [`get_pool`]: lazy, process-wide `PgPool` (up to 5 connections) read from
//!   `DATABASE_URL`.
//! - [`PgStore`]: the [`store::DocumentStore`] used by every server function.
//!   Each statement carries the owner predicate, so one owner's records are
//!   never read, changed or removed through another owner's session.
//! - [`repository`]: a [`store::Repository`] over the shared pool.

#[cfg(feature = "server")]
mod pg_store;
#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pg_store::PgStore;
#[cfg(feature = "server")]
pub use pool::get_pool;

/// Build a repository over the shared pool.
#[cfg(feature = "server")]
pub async fn repository() -> Result<store::Repository<PgStore>, sqlx::Error> {
    let pool = get_pool().await?;
    Ok(store::Repository::new(PgStore::new(pool.clone())))
}
