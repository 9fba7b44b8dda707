//! Read-only client for the spreadsheet service.
//!
//! One request per import: `GET {base}/{spreadsheet_id}/values/{range}?key={api_key}`.
//! The response grid is turned into leads by [`store::ValueRange::into_leads`].

use std::time::Duration;

use reqwest::Url;
use store::{SheetLead, SheetsConfig, StoreError, ValueRange};
use tokio::sync::OnceCell;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static SHARED: OnceCell<Option<SheetsClient>> = OnceCell::const_new();

pub struct SheetsClient {
    http: reqwest::Client,
    base: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
}

impl SheetsClient {
    /// Build a client from configuration. `None` when the importer is not configured.
    pub fn from_config(config: &SheetsConfig) -> Result<Option<Self>, StoreError> {
        if !config.is_configured() {
            return Ok(None);
        }
        let (Some(spreadsheet_id), Some(api_key)) = (&config.spreadsheet_id, &config.api_key)
        else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Read(e.to_string()))?;

        Ok(Some(Self {
            http,
            base: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            range: config.range.clone(),
            api_key: api_key.trim().to_string(),
        }))
    }

    /// The process-wide client, built from `config` on first use. Configuration
    /// is loaded once per process, so later calls reuse the same connection pool.
    pub async fn shared(config: &SheetsConfig) -> Result<Option<&'static Self>, StoreError> {
        SHARED
            .get_or_try_init(|| async { Self::from_config(config) })
            .await
            .map(Option::as_ref)
    }

    /// Point the client at another endpoint, e.g. a local fake.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Full request URL. Path segments are percent-encoded.
    pub fn values_url(&self) -> Result<Url, StoreError> {
        let mut url =
            Url::parse(&self.base).map_err(|e| StoreError::Read(format!("bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Read("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&self.range);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Fetch the configured range and convert it to leads.
    pub async fn read_leads(&self) -> Result<Vec<SheetLead>, StoreError> {
        let url = self.values_url()?;
        tracing::debug!(spreadsheet = %self.spreadsheet_id, range = %self.range, "reading sheet");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::Read(format!("spreadsheet request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Read(format!(
                "spreadsheet service returned {}",
                status
            )));
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Read(format!("unreadable spreadsheet response: {}", e.without_url())))?;

        Ok(body.into_leads())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: Some("sheet-123".to_string()),
            range: "Sheet1!A:D".to_string(),
            api_key: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_unconfigured_client_is_none() {
        assert!(SheetsClient::from_config(&SheetsConfig::default())
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_shared_client_is_built_once() {
        let first = SheetsClient::shared(&config()).await.unwrap().unwrap();
        let second = SheetsClient::shared(&SheetsConfig::default())
            .await
            .unwrap()
            .unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.spreadsheet_id, "sheet-123");
    }

    #[test]
    fn test_values_url_shape() {
        let client = SheetsClient::from_config(&config()).unwrap().unwrap();
        let url = client.values_url().unwrap();

        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert_eq!(
            url.path(),
            "/v4/spreadsheets/sheet-123/values/Sheet1!A:D"
        );
        assert_eq!(url.query(), Some("key=secret"));
    }

    #[test]
    fn test_range_with_spaces_is_encoded() {
        let mut cfg = config();
        cfg.range = "Lead Sheet!A:D".to_string();
        let client = SheetsClient::from_config(&cfg)
            .unwrap()
            .unwrap()
            .with_base("http://127.0.0.1:9/v4/spreadsheets/");
        let url = client.values_url().unwrap();

        assert_eq!(url.path(), "/v4/spreadsheets/sheet-123/values/Lead%20Sheet!A:D");
    }
}
