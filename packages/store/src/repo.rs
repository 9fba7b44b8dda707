//! # Repository: owner-scoped lead and campaign persistence
//!
//! [`Repository`] is the persistence client every screen goes through. It
//! validates input, delegates to an abstract [`DocumentStore`], and composes the
//! overview counters. The same logic runs against the in-memory store (tests)
//! and the PostgreSQL store on the server.
//!
//! ## [`DocumentStore`] trait
//!
//! An async interface whose every primitive takes the owner id. Implementations
//! must apply the owner predicate themselves: there is no "list everything"
//! primitive, so a record can only ever be read, changed or removed through
//! its owner.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`add_lead`](Repository::add_lead) | Validates the form and stores a lead stamped with the owner. |
//! | [`get_leads`](Repository::get_leads) | The owner's leads, newest first. |
//! | [`delete_lead`](Repository::delete_lead) | Removes a lead if the owner holds it, else [`StoreError::NotFound`]. |
//! | [`add_campaign`](Repository::add_campaign) | Validates, checks that every selected lead is the owner's, stores. |
//! | [`get_campaigns`](Repository::get_campaigns) | The owner's campaigns, newest first. |
//! | [`update_campaign`](Repository::update_campaign) | Partial update, owner-checked. Archived is terminal. |
//! | [`delete_campaign`](Repository::delete_campaign) | Owner-checked removal. |
//! | [`get_analytics`](Repository::get_analytics) | Lead/campaign counts, global owner count, five most recent leads. |

use std::future::Future;

use crate::error::StoreError;
use crate::models::{
    Analytics, Campaign, CampaignStatus, CampaignUpdate, Lead, NewCampaign, NewLead, RECENT_LEADS,
};
use crate::validate::{validate_campaign, validate_campaign_update, validate_lead};

/// Async storage backend for the two record collections.
///
/// Listing primitives return records ordered by creation time, newest first.
/// Removal and modification of a record the owner does not hold must fail with
/// [`StoreError::NotFound`] and leave the record untouched.
pub trait DocumentStore {
    fn insert_lead(
        &self,
        owner: &str,
        lead: NewLead,
    ) -> impl Future<Output = Result<Lead, StoreError>> + Send;
    fn list_leads(&self, owner: &str) -> impl Future<Output = Result<Vec<Lead>, StoreError>> + Send;
    fn remove_lead(&self, owner: &str, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn insert_campaign(
        &self,
        owner: &str,
        campaign: NewCampaign,
    ) -> impl Future<Output = Result<Campaign, StoreError>> + Send;
    fn list_campaigns(
        &self,
        owner: &str,
    ) -> impl Future<Output = Result<Vec<Campaign>, StoreError>> + Send;
    fn modify_campaign(
        &self,
        owner: &str,
        id: &str,
        update: CampaignUpdate,
    ) -> impl Future<Output = Result<Campaign, StoreError>> + Send;
    fn remove_campaign(
        &self,
        owner: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Number of registered owners across the installation.
    fn count_owners(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

/// Persistence client backed by a DocumentStore.
pub struct Repository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn add_lead(&self, owner: &str, lead: NewLead) -> Result<Lead, StoreError> {
        let lead = validate_lead(&lead)?;
        self.store.insert_lead(owner, lead).await
    }

    pub async fn get_leads(&self, owner: &str) -> Result<Vec<Lead>, StoreError> {
        self.store.list_leads(owner).await
    }

    pub async fn delete_lead(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.store.remove_lead(owner, id).await
    }

    pub async fn add_campaign(
        &self,
        owner: &str,
        campaign: NewCampaign,
    ) -> Result<Campaign, StoreError> {
        let campaign = validate_campaign(&campaign)?;
        self.check_selection(owner, &campaign.selected_users).await?;
        self.store.insert_campaign(owner, campaign).await
    }

    pub async fn get_campaigns(&self, owner: &str) -> Result<Vec<Campaign>, StoreError> {
        self.store.list_campaigns(owner).await
    }

    /// Archived campaigns keep their status. Lead ids already on the campaign
    /// are kept even when the lead has since been deleted; newly added ids must
    /// be the owner's leads.
    pub async fn update_campaign(
        &self,
        owner: &str,
        id: &str,
        update: CampaignUpdate,
    ) -> Result<Campaign, StoreError> {
        let update = validate_campaign_update(&update)?;
        let current = self
            .store
            .list_campaigns(owner)
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;

        if update.is_empty() {
            return Ok(current);
        }
        if let Some(next) = update.status {
            if current.status == CampaignStatus::Archived && next != CampaignStatus::Archived {
                return Err(StoreError::validation(
                    "Archived campaigns cannot be reopened",
                ));
            }
        }
        if let Some(ref selected) = update.selected_users {
            let added: Vec<String> = selected
                .iter()
                .filter(|lead_id| !current.selected_users.contains(*lead_id))
                .cloned()
                .collect();
            self.check_selection(owner, &added).await?;
        }
        self.store.modify_campaign(owner, id, update).await
    }

    pub async fn delete_campaign(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.store.remove_campaign(owner, id).await
    }

    pub async fn get_analytics(&self, owner: &str) -> Result<Analytics, StoreError> {
        let leads = self.get_leads(owner).await?;
        let campaigns = self.get_campaigns(owner).await?;
        let total_users = self.store.count_owners().await?;

        Ok(Analytics {
            total_leads: leads.len(),
            total_users,
            total_campaigns: campaigns.len(),
            recent_leads: leads.into_iter().take(RECENT_LEADS).collect(),
        })
    }

    /// Every selected id must name one of the owner's leads right now.
    async fn check_selection(&self, owner: &str, selected: &[String]) -> Result<(), StoreError> {
        if selected.is_empty() {
            return Ok(());
        }
        let leads = self.store.list_leads(owner).await?;
        match selected
            .iter()
            .find(|id| !leads.iter().any(|lead| &lead.id == *id))
        {
            Some(unknown) => Err(StoreError::validation(format!(
                "Unknown lead selected: {}",
                unknown
            ))),
            None => Ok(()),
        }
    }
}
