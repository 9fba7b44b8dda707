//! # Spreadsheet grid parsing
//!
//! The spreadsheet service answers a `values/{range}` read with a JSON object
//! holding a two-dimensional grid of strings:
//!
//! ```json
//! { "range": "Sheet1!A1:D3", "majorDimension": "ROWS",
//!   "values": [["Name", "Number", "Remarks", "Timestamp"],
//!              ["Jane", "4155551234", "warm", "2024-05-01"]] }
//! ```
//!
//! The first row is a header and is dropped. Each remaining row maps positionally
//! onto [`SheetLead`] (`A` name, `B` number, `C` remarks, `D` timestamp); cells the
//! service omits at the end of a short row become empty strings.

use serde::{Deserialize, Serialize};

use crate::models::SheetLead;

/// Default range read when none is configured: four columns of the first sheet.
pub const DEFAULT_RANGE: &str = "Sheet1!A:D";

/// Response body of a `spreadsheets.values.get` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    /// Absent entirely when the range is empty.
    #[serde(default)]
    pub values: Option<Vec<Vec<String>>>,
}

impl ValueRange {
    /// Zip every row after the header into a [`SheetLead`].
    pub fn into_leads(self) -> Vec<SheetLead> {
        let Some(rows) = self.values else {
            return Vec::new();
        };

        rows.into_iter()
            .skip(1)
            .map(|row| {
                let mut cells = row.into_iter();
                SheetLead {
                    name: cells.next().unwrap_or_default(),
                    number: cells.next().unwrap_or_default(),
                    remarks: cells.next().unwrap_or_default(),
                    timestamp: cells.next().unwrap_or_default(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_dropped_and_rows_zipped() {
        let body = r#"{
            "range": "Sheet1!A1:D3",
            "majorDimension": "ROWS",
            "values": [
                ["Name", "Number", "Remarks", "Timestamp"],
                ["Jane", "4155551234", "warm", "2024-05-01T10:00:00Z"],
                ["Raj", "6238301744"]
            ]
        }"#;

        let range: ValueRange = serde_json::from_str(body).unwrap();
        let leads = range.into_leads();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Jane");
        assert_eq!(leads[0].timestamp, "2024-05-01T10:00:00Z");
        assert_eq!(
            leads[1],
            SheetLead {
                name: "Raj".to_string(),
                number: "6238301744".to_string(),
                remarks: String::new(),
                timestamp: String::new(),
            }
        );
    }

    #[test]
    fn test_missing_values_is_empty() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range": "Sheet1!A1:D1", "majorDimension": "ROWS"}"#)
                .unwrap();
        assert!(range.into_leads().is_empty());

        let header_only = ValueRange {
            values: Some(vec![vec!["Name".to_string()]]),
            ..ValueRange::default()
        };
        assert!(header_only.into_leads().is_empty());
    }
}
