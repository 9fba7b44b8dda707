use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::error::StoreError;
use crate::models::{Campaign, CampaignUpdate, Lead, NewCampaign, NewLead};
use crate::repo::DocumentStore;

/// In-memory DocumentStore for tests.
///
/// Records are kept in insertion order; listing reverses that so the newest
/// record comes first, matching a `created_at DESC` query.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    leads: Arc<Mutex<Vec<Lead>>>,
    campaigns: Arc<Mutex<Vec<Campaign>>>,
    owners: Arc<Mutex<HashSet<String>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner so it shows up in [`DocumentStore::count_owners`].
    pub fn register_owner(&self, owner: &str) {
        if let Ok(mut owners) = self.owners.lock() {
            owners.insert(owner.to_string());
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{:06}", prefix, n)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Write("memory store lock poisoned".to_string()))
}

impl DocumentStore for MemoryStore {
    async fn insert_lead(&self, owner: &str, lead: NewLead) -> Result<Lead, StoreError> {
        let now = Utc::now();
        let lead = Lead {
            id: self.next_id("lead"),
            name: lead.name,
            number: lead.number,
            remarks: lead.remarks,
            user_id: owner.to_string(),
            created_at: now,
            updated_at: now,
        };
        lock(&self.leads)?.push(lead.clone());
        Ok(lead)
    }

    async fn list_leads(&self, owner: &str) -> Result<Vec<Lead>, StoreError> {
        let leads = lock(&self.leads)?;
        Ok(leads
            .iter()
            .rev()
            .filter(|l| l.user_id == owner)
            .cloned()
            .collect())
    }

    async fn remove_lead(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        let mut leads = lock(&self.leads)?;
        let pos = leads
            .iter()
            .position(|l| l.id == id && l.user_id == owner)
            .ok_or(StoreError::NotFound)?;
        leads.remove(pos);
        Ok(())
    }

    async fn insert_campaign(
        &self,
        owner: &str,
        campaign: NewCampaign,
    ) -> Result<Campaign, StoreError> {
        let now = Utc::now();
        let campaign = Campaign {
            id: self.next_id("campaign"),
            name: campaign.name,
            description: campaign.description,
            selected_users: campaign.selected_users,
            status: campaign.status,
            user_id: owner.to_string(),
            created_at: now,
            updated_at: now,
        };
        lock(&self.campaigns)?.push(campaign.clone());
        Ok(campaign)
    }

    async fn list_campaigns(&self, owner: &str) -> Result<Vec<Campaign>, StoreError> {
        let campaigns = lock(&self.campaigns)?;
        Ok(campaigns
            .iter()
            .rev()
            .filter(|c| c.user_id == owner)
            .cloned()
            .collect())
    }

    async fn modify_campaign(
        &self,
        owner: &str,
        id: &str,
        update: CampaignUpdate,
    ) -> Result<Campaign, StoreError> {
        let mut campaigns = lock(&self.campaigns)?;
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id && c.user_id == owner)
            .ok_or(StoreError::NotFound)?;
        update.apply_to(campaign);
        campaign.updated_at = Utc::now();
        Ok(campaign.clone())
    }

    async fn remove_campaign(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        let mut campaigns = lock(&self.campaigns)?;
        let pos = campaigns
            .iter()
            .position(|c| c.id == id && c.user_id == owner)
            .ok_or(StoreError::NotFound)?;
        campaigns.remove(pos);
        Ok(())
    }

    async fn count_owners(&self) -> Result<u64, StoreError> {
        Ok(lock(&self.owners)?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CampaignStatus, RECENT_LEADS};
    use crate::repo::Repository;

    const ALICE: &str = "owner-alice";
    const BOB: &str = "owner-bob";

    fn repo() -> Repository<MemoryStore> {
        let store = MemoryStore::new();
        store.register_owner(ALICE);
        store.register_owner(BOB);
        Repository::new(store)
    }

    #[tokio::test]
    async fn test_add_then_list_lead() {
        let repo = repo();

        assert!(repo.get_leads(ALICE).await.unwrap().is_empty());

        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "415 555 1234").with_remarks("met at expo"))
            .await
            .unwrap();
        assert_eq!(lead.user_id, ALICE);
        assert_eq!(lead.number, "4155551234");

        let leads = repo.get_leads(ALICE).await.unwrap();
        assert_eq!(leads, vec![lead]);
    }

    #[tokio::test]
    async fn test_leads_are_scoped_to_owner() {
        let repo = repo();

        repo.add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();
        repo.add_lead(BOB, NewLead::new("Raj", "6238301744"))
            .await
            .unwrap();

        let alice = repo.get_leads(ALICE).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert!(alice.iter().all(|l| l.user_id == ALICE));

        let bob = repo.get_leads(BOB).await.unwrap();
        assert_eq!(bob.len(), 1);
        assert!(!bob.iter().any(|l| l.name == "Jane"));
    }

    #[tokio::test]
    async fn test_invalid_lead_is_not_stored() {
        let repo = repo();

        let err = repo
            .add_lead(ALICE, NewLead::new("Jane", "12345"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(repo.get_leads(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leads_newest_first() {
        let repo = repo();

        for name in ["first", "second", "third"] {
            repo.add_lead(ALICE, NewLead::new(name, "6238301744"))
                .await
                .unwrap();
        }

        let names: Vec<String> = repo
            .get_leads(ALICE)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_lead_removes_it_for_everyone() {
        let repo = repo();

        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();
        repo.delete_lead(ALICE, &lead.id).await.unwrap();

        for owner in [ALICE, BOB] {
            let leads = repo.get_leads(owner).await.unwrap();
            assert!(!leads.iter().any(|l| l.id == lead.id));
        }
        assert_eq!(
            repo.delete_lead(ALICE, &lead.id).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_foreign_delete_is_rejected() {
        let repo = repo();

        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();

        assert_eq!(
            repo.delete_lead(BOB, &lead.id).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(repo.get_leads(ALICE).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_campaign_lifecycle() {
        let repo = repo();

        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();

        let campaign = repo
            .add_campaign(
                ALICE,
                NewCampaign {
                    name: " Spring outreach ".to_string(),
                    description: "Cold calls".to_string(),
                    selected_users: vec![lead.id.clone()],
                    status: CampaignStatus::Draft,
                },
            )
            .await
            .unwrap();
        assert_eq!(campaign.name, "Spring outreach");
        assert_eq!(campaign.status, CampaignStatus::Draft);

        let updated = repo
            .update_campaign(ALICE, &campaign.id, CampaignUpdate::status(CampaignStatus::Active))
            .await
            .unwrap();
        assert_eq!(updated.status, CampaignStatus::Active);
        assert_eq!(updated.name, "Spring outreach");
        assert!(updated.updated_at >= campaign.updated_at);

        assert_eq!(repo.get_campaigns(ALICE).await.unwrap(), vec![updated]);
        assert!(repo.get_campaigns(BOB).await.unwrap().is_empty());

        repo.delete_campaign(ALICE, &campaign.id).await.unwrap();
        assert!(repo.get_campaigns(ALICE).await.unwrap().is_empty());
    }

    async fn campaign_with(repo: &Repository<MemoryStore>, leads: Vec<String>) -> Campaign {
        repo.add_campaign(
            ALICE,
            NewCampaign {
                name: "Launch".to_string(),
                selected_users: leads,
                ..NewCampaign::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_archived_campaign_stays_archived() {
        let repo = repo();
        let campaign = campaign_with(&repo, Vec::new()).await;

        repo.update_campaign(ALICE, &campaign.id, CampaignUpdate::status(CampaignStatus::Archived))
            .await
            .unwrap();

        for status in [CampaignStatus::Active, CampaignStatus::Draft, CampaignStatus::Paused] {
            let err = repo
                .update_campaign(ALICE, &campaign.id, CampaignUpdate::status(status))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
        }

        let stored = repo.get_campaigns(ALICE).await.unwrap();
        assert_eq!(stored[0].status, CampaignStatus::Archived);
    }

    #[tokio::test]
    async fn test_update_keeps_reference_to_deleted_lead() {
        let repo = repo();
        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();
        let campaign = campaign_with(&repo, vec![lead.id.clone()]).await;
        repo.delete_lead(ALICE, &lead.id).await.unwrap();

        let updated = repo
            .update_campaign(
                ALICE,
                &campaign.id,
                CampaignUpdate {
                    name: Some("Relaunch".to_string()),
                    selected_users: Some(vec![lead.id.clone()]),
                    ..CampaignUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Relaunch");
        assert_eq!(updated.selected_users, vec![lead.id]);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let repo = repo();
        let campaign = campaign_with(&repo, Vec::new()).await;

        let err = repo
            .update_campaign(
                ALICE,
                &campaign.id,
                CampaignUpdate {
                    name: Some("   ".to_string()),
                    ..CampaignUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(repo.get_campaigns(ALICE).await.unwrap()[0].name, "Launch");
    }

    #[tokio::test]
    async fn test_update_trims_description_and_dedupes_selection() {
        let repo = repo();
        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();
        let campaign = campaign_with(&repo, Vec::new()).await;

        let updated = repo
            .update_campaign(
                ALICE,
                &campaign.id,
                CampaignUpdate {
                    description: Some("  warm follow-ups \n".to_string()),
                    selected_users: Some(vec![lead.id.clone(), lead.id.clone()]),
                    ..CampaignUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "warm follow-ups");
        assert_eq!(updated.selected_users, vec![lead.id]);
    }

    #[tokio::test]
    async fn test_update_rejects_foreign_lead() {
        let repo = repo();
        let bobs = repo
            .add_lead(BOB, NewLead::new("Raj", "6238301744"))
            .await
            .unwrap();
        let campaign = campaign_with(&repo, Vec::new()).await;

        let err = repo
            .update_campaign(
                ALICE,
                &campaign.id,
                CampaignUpdate {
                    selected_users: Some(vec![bobs.id.clone()]),
                    ..CampaignUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(repo.get_campaigns(ALICE).await.unwrap()[0]
            .selected_users
            .is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_leaves_campaign_untouched() {
        let repo = repo();
        let campaign = campaign_with(&repo, Vec::new()).await;

        let same = repo
            .update_campaign(ALICE, &campaign.id, CampaignUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, campaign);
    }

    #[tokio::test]
    async fn test_foreign_campaign_update_is_rejected() {
        let repo = repo();

        let campaign = repo
            .add_campaign(
                ALICE,
                NewCampaign {
                    name: "Launch".to_string(),
                    ..NewCampaign::default()
                },
            )
            .await
            .unwrap();

        let err = repo
            .update_campaign(BOB, &campaign.id, CampaignUpdate::status(CampaignStatus::Archived))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
        assert_eq!(
            repo.delete_campaign(BOB, &campaign.id).await,
            Err(StoreError::NotFound)
        );

        let still = repo.get_campaigns(ALICE).await.unwrap();
        assert_eq!(still[0].status, CampaignStatus::Draft);
    }

    #[tokio::test]
    async fn test_campaign_cannot_select_foreign_leads() {
        let repo = repo();

        let bobs = repo
            .add_lead(BOB, NewLead::new("Raj", "6238301744"))
            .await
            .unwrap();

        let err = repo
            .add_campaign(
                ALICE,
                NewCampaign {
                    name: "Poach".to_string(),
                    selected_users: vec![bobs.id.clone()],
                    ..NewCampaign::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deleted_lead_stays_referenced() {
        let repo = repo();

        let lead = repo
            .add_lead(ALICE, NewLead::new("Jane", "4155551234"))
            .await
            .unwrap();
        repo.add_campaign(
            ALICE,
            NewCampaign {
                name: "Launch".to_string(),
                selected_users: vec![lead.id.clone()],
                ..NewCampaign::default()
            },
        )
        .await
        .unwrap();

        repo.delete_lead(ALICE, &lead.id).await.unwrap();

        let campaigns = repo.get_campaigns(ALICE).await.unwrap();
        assert_eq!(campaigns[0].selected_users, vec![lead.id]);
    }

    #[tokio::test]
    async fn test_analytics_matches_listing() {
        let repo = repo();

        for i in 0..7 {
            repo.add_lead(ALICE, NewLead::new(format!("lead {i}"), "6238301744"))
                .await
                .unwrap();
        }
        repo.add_lead(BOB, NewLead::new("Raj", "4155551234"))
            .await
            .unwrap();
        repo.add_campaign(
            ALICE,
            NewCampaign {
                name: "Launch".to_string(),
                ..NewCampaign::default()
            },
        )
        .await
        .unwrap();

        let analytics = repo.get_analytics(ALICE).await.unwrap();
        let leads = repo.get_leads(ALICE).await.unwrap();

        assert_eq!(analytics.total_leads, leads.len());
        assert_eq!(analytics.total_campaigns, 1);
        assert_eq!(analytics.total_users, 2);
        assert_eq!(analytics.recent_leads.len(), RECENT_LEADS);
        assert_eq!(analytics.recent_leads[..], leads[..RECENT_LEADS]);
        assert_eq!(analytics.recent_leads[0].name, "lead 6");
    }
}
