//! # Dashboard configuration: `leaddesk.toml`
//!
//! Optional TOML file read by the server at startup. A missing or empty file is
//! equivalent to the defaults; environment variables are layered on top by
//! `api::config`.
//!
//! ```toml
//! [sheets]
//! spreadsheet_id = "1ru1l1LOBG4m..."
//! range = "Sheet1!A:D"
//! api_key = "..."
//!
//! [session]
//! expiry_days = 7
//! secure_cookie = false
//! ```

use serde::{Deserialize, Serialize};

use crate::sheets::DEFAULT_RANGE;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Spreadsheet import source. The importer is disabled until both the
/// spreadsheet id and the API key are set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: default_range(),
            api_key: None,
        }
    }
}

impl SheetsConfig {
    pub fn is_configured(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.spreadsheet_id) && set(&self.api_key)
    }
}

/// Session cookie settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions expire after this many days of inactivity.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
    /// Mark the cookie `Secure`. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_expiry_days() -> u32 {
    7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_days: default_expiry_days(),
            secure_cookie: false,
        }
    }
}

impl DashboardConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "leaddesk.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sheets.range, "Sheet1!A:D");
        assert_eq!(config.session.expiry_days, 7);
        assert!(!config.sheets.is_configured());
    }

    #[test]
    fn test_partial_sections() {
        let config = DashboardConfig::from_toml(
            r#"
            [sheets]
            spreadsheet_id = "abc"
            api_key = "key"

            [session]
            secure_cookie = true
            "#,
        )
        .unwrap();

        assert!(config.sheets.is_configured());
        assert_eq!(config.sheets.range, DEFAULT_RANGE);
        assert!(config.session.secure_cookie);
        assert_eq!(config.session.expiry_days, 7);

        let reparsed = DashboardConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let sheets = SheetsConfig {
            spreadsheet_id: Some("abc".to_string()),
            api_key: Some("  ".to_string()),
            ..SheetsConfig::default()
        };
        assert!(!sheets.is_configured());
    }
}
