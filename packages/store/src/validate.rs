//! Form validation shared by the browser and the server.
//!
//! The UI calls these for immediate feedback; [`crate::Repository`] calls them
//! again before anything reaches a [`crate::DocumentStore`].

use crate::error::StoreError;
use crate::models::{CampaignUpdate, NewCampaign, NewLead};

pub const PHONE_DIGITS: usize = 10;

/// Strip whitespace and check for exactly ten ASCII digits.
/// Returns the normalized number.
pub fn validate_phone(raw: &str) -> Result<String, StoreError> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == PHONE_DIGITS && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(StoreError::validation("Please enter a valid 10-digit number"))
    }
}

/// Validate and normalize a lead form.
pub fn validate_lead(lead: &NewLead) -> Result<NewLead, StoreError> {
    let name = lead.name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("Name is required"));
    }
    if lead.number.trim().is_empty() {
        return Err(StoreError::validation("Number is required"));
    }
    let number = validate_phone(&lead.number)?;

    Ok(NewLead {
        name: name.to_string(),
        number,
        remarks: lead.remarks.trim().to_string(),
    })
}

/// Validate and normalize a campaign form. Duplicate lead ids are dropped.
pub fn validate_campaign(campaign: &NewCampaign) -> Result<NewCampaign, StoreError> {
    let name = campaign.name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("Campaign name is required"));
    }

    Ok(NewCampaign {
        name: name.to_string(),
        description: campaign.description.trim().to_string(),
        selected_users: dedupe_ids(&campaign.selected_users),
        status: campaign.status,
    })
}

/// Normalize the fields present in a partial campaign update.
pub fn validate_campaign_update(update: &CampaignUpdate) -> Result<CampaignUpdate, StoreError> {
    let name = match update.name.as_deref().map(str::trim) {
        Some("") => return Err(StoreError::validation("Campaign name is required")),
        other => other.map(str::to_string),
    };

    Ok(CampaignUpdate {
        name,
        description: update.description.as_deref().map(|d| d.trim().to_string()),
        selected_users: update.selected_users.as_deref().map(dedupe_ids),
        status: update.status,
    })
}

/// Lead ids in first-seen order, without repeats.
pub fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_ten_digits() {
        assert_eq!(validate_phone("6238301744").unwrap(), "6238301744");
        assert_eq!(validate_phone(" 623 830\t1744 ").unwrap(), "6238301744");
    }

    #[test]
    fn test_phone_rejects_everything_else() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("62383017445").is_err());
        assert!(validate_phone("623-830-1744").is_err());
        assert!(validate_phone("").is_err());
        // Non-ASCII digits are not phone digits.
        assert!(validate_phone("٦٢٣٨٣٠١٧٤٤").is_err());
    }

    #[test]
    fn test_lead_requires_name_then_number() {
        let err = validate_lead(&NewLead::new("  ", "6238301744")).unwrap_err();
        assert_eq!(err, StoreError::validation("Name is required"));

        let err = validate_lead(&NewLead::new("Jane", " ")).unwrap_err();
        assert_eq!(err, StoreError::validation("Number is required"));

        let lead = validate_lead(&NewLead::new(" Jane ", "415 555 1234").with_remarks(" hot "))
            .unwrap();
        assert_eq!(lead.name, "Jane");
        assert_eq!(lead.number, "4155551234");
        assert_eq!(lead.remarks, "hot");
    }

    #[test]
    fn test_campaign_dedupes_selection() {
        let campaign = NewCampaign {
            name: "Launch".to_string(),
            selected_users: vec!["a".into(), "b".into(), "a".into()],
            ..NewCampaign::default()
        };
        let clean = validate_campaign(&campaign).unwrap();
        assert_eq!(clean.selected_users, vec!["a".to_string(), "b".to_string()]);

        assert!(validate_campaign(&NewCampaign::default()).is_err());
    }

    #[test]
    fn test_campaign_update_normalizes_present_fields() {
        let update = CampaignUpdate {
            name: Some(" Renamed ".to_string()),
            description: Some("  calls  ".to_string()),
            selected_users: Some(vec!["a".into(), "a".into(), "b".into()]),
            status: None,
        };
        let clean = validate_campaign_update(&update).unwrap();
        assert_eq!(clean.name.as_deref(), Some("Renamed"));
        assert_eq!(clean.description.as_deref(), Some("calls"));
        assert_eq!(
            clean.selected_users,
            Some(vec!["a".to_string(), "b".to_string()])
        );

        let blank = CampaignUpdate {
            name: Some("   ".to_string()),
            ..CampaignUpdate::default()
        };
        assert_eq!(
            validate_campaign_update(&blank),
            Err(StoreError::validation("Campaign name is required"))
        );
        assert_eq!(
            validate_campaign_update(&CampaignUpdate::default()),
            Ok(CampaignUpdate::default())
        );
    }
}
