//! # Domain models for leads, campaigns and the overview
//!
//! These are the records the persistence layer hands back to callers. They are
//! `Serialize + Deserialize` so they can cross the server/client boundary via
//! Dioxus server functions, and they keep ids as plain strings so they work in
//! WASM without pulling in a UUID implementation.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Lead`] | A captured contact owned by exactly one user. |
//! | [`NewLead`] | The add-lead form as submitted, before validation. |
//! | [`Campaign`] | A named grouping of lead ids with a [`CampaignStatus`]. |
//! | [`NewCampaign`] / [`CampaignUpdate`] | Create and partial-update payloads. |
//! | [`Analytics`] | Counters and the most recent leads for the overview screen. |
//! | [`SheetLead`] | One row imported from the spreadsheet service. |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of leads shown in [`Analytics::recent_leads`].
pub const RECENT_LEADS: usize = 5;

/// A contact record owned by one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    /// Ten digits, whitespace already stripped.
    pub number: String,
    pub remarks: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lead form contents as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub number: String,
    pub remarks: String,
}

impl NewLead {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            remarks: String::new(),
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

/// Lifecycle of a campaign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Archived,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Active,
        CampaignStatus::Draft,
        CampaignStatus::Paused,
        CampaignStatus::Archived,
    ];

    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Archived => "archived",
        }
    }

    /// Human label used by tabs and badges.
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Drafts",
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "archived" => Ok(CampaignStatus::Archived),
            other => Err(format!("Unknown campaign status: {}", other)),
        }
    }
}

/// A named grouping of leads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Lead ids. A lead deleted later stays referenced here.
    pub selected_users: Vec<String>,
    pub status: CampaignStatus,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign form contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub selected_users: Vec<String>,
    pub status: CampaignStatus,
}

/// Partial update of a campaign. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub selected_users: Option<Vec<String>>,
    pub status: Option<CampaignStatus>,
}

impl CampaignUpdate {
    pub fn status(status: CampaignStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.selected_users.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields to `campaign`. Timestamps are left to the store.
    pub fn apply_to(&self, campaign: &mut Campaign) {
        if let Some(ref name) = self.name {
            campaign.name = name.clone();
        }
        if let Some(ref description) = self.description {
            campaign.description = description.clone();
        }
        if let Some(ref selected) = self.selected_users {
            campaign.selected_users = selected.clone();
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
    }
}

/// Overview counters for one owner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_leads: usize,
    /// Registered owners across the whole installation.
    pub total_users: u64,
    pub total_campaigns: usize,
    pub recent_leads: Vec<Lead>,
}

/// A lead row read from the spreadsheet service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetLead {
    pub name: String,
    pub number: String,
    pub remarks: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_through_str() {
        for status in CampaignStatus::ALL {
            assert_eq!(status.as_str().parse::<CampaignStatus>(), Ok(status));
        }
        assert!("live".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let now = Utc::now();
        let mut campaign = Campaign {
            id: "c1".to_string(),
            name: "Spring".to_string(),
            description: "Outbound".to_string(),
            selected_users: vec!["l1".to_string()],
            status: CampaignStatus::Draft,
            user_id: "u1".to_string(),
            created_at: now,
            updated_at: now,
        };

        CampaignUpdate::status(CampaignStatus::Active).apply_to(&mut campaign);
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(campaign.name, "Spring");
        assert_eq!(campaign.selected_users, vec!["l1".to_string()]);
        assert!(CampaignUpdate::default().is_empty());
    }
}
