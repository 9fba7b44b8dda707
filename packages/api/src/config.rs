//! Server configuration from `leaddesk.toml` and environment variables.
//!
//! Load order, later wins:
//!
//! 1. [`DashboardConfig::default`]
//! 2. the TOML file named by `LEADDESK_CONFIG`, or `leaddesk.toml` in the working
//!    directory when present
//! 3. `SHEETS_SPREADSHEET_ID`, `SHEETS_API_KEY`, `SHEETS_RANGE`,
//!    `SESSION_SECURE`, `SESSION_EXPIRY_DAYS`
//!
//! `.env` is read first via `dotenvy`. `DATABASE_URL` is read by [`crate::db`].

use std::path::Path;

use store::DashboardConfig;
use tokio::sync::OnceCell;

use crate::error::ConfigError;

static CONFIG: OnceCell<DashboardConfig> = OnceCell::const_new();

/// Get or load the process-wide configuration.
pub async fn get_config() -> Result<&'static DashboardConfig, ConfigError> {
    CONFIG.get_or_try_init(|| async { load() }).await
}

/// Load configuration from disk and environment.
pub fn load() -> Result<DashboardConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let explicit = std::env::var("LEADDESK_CONFIG").ok();
    let path = explicit
        .clone()
        .unwrap_or_else(|| DashboardConfig::filename().to_string());

    let mut config = if explicit.is_some() || Path::new(&path).exists() {
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        DashboardConfig::from_toml(&raw).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?
    } else {
        DashboardConfig::default()
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Overlay environment values onto `config`. `lookup` abstracts `std::env::var`.
pub fn apply_env(
    config: &mut DashboardConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(id) = lookup("SHEETS_SPREADSHEET_ID") {
        config.sheets.spreadsheet_id = Some(id);
    }
    if let Some(key) = lookup("SHEETS_API_KEY") {
        config.sheets.api_key = Some(key);
    }
    if let Some(range) = lookup("SHEETS_RANGE").filter(|r| !r.trim().is_empty()) {
        config.sheets.range = range;
    }
    if let Some(value) = lookup("SESSION_SECURE") {
        config.session.secure_cookie = match value.trim() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            _ => {
                return Err(ConfigError::Env {
                    var: "SESSION_SECURE",
                    value,
                })
            }
        };
    }
    if let Some(value) = lookup("SESSION_EXPIRY_DAYS") {
        config.session.expiry_days = value
            .trim()
            .parse()
            .ok()
            .filter(|days: &u32| *days > 0)
            .ok_or(ConfigError::Env {
                var: "SESSION_EXPIRY_DAYS",
                value,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = DashboardConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("SHEETS_SPREADSHEET_ID", "sheet"),
                ("SHEETS_API_KEY", "key"),
                ("SESSION_SECURE", "true"),
                ("SESSION_EXPIRY_DAYS", "30"),
            ]),
        )
        .unwrap();

        assert!(config.sheets.is_configured());
        assert_eq!(config.sheets.range, "Sheet1!A:D");
        assert!(config.session.secure_cookie);
        assert_eq!(config.session.expiry_days, 30);
    }

    #[test]
    fn test_bad_env_values_are_rejected() {
        let mut config = DashboardConfig::default();
        assert!(apply_env(&mut config, env(&[("SESSION_SECURE", "maybe")])).is_err());
        assert!(apply_env(&mut config, env(&[("SESSION_EXPIRY_DAYS", "0")])).is_err());
        assert!(apply_env(&mut config, env(&[("SESSION_EXPIRY_DAYS", "week")])).is_err());
    }
}
