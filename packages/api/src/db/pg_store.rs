use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use store::{
    Campaign, CampaignStatus, CampaignUpdate, DocumentStore, Lead, NewCampaign, NewLead,
    StoreError,
};
use uuid::Uuid;

/// PostgreSQL-backed DocumentStore.
///
/// `PgPool` is reference counted, so cloning a store shares the pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeadRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    number: String,
    remarks: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id.to_string(),
            name: row.name,
            number: row.number,
            remarks: row.remarks,
            user_id: row.user_id.to_string(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CampaignRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: String,
    selected_users: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = StoreError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        let status: CampaignStatus = row.status.parse().map_err(StoreError::Read)?;
        Ok(Campaign {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            selected_users: row.selected_users,
            status,
            user_id: row.user_id.to_string(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn owner_id(owner: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(owner).map_err(|_| StoreError::Read(format!("invalid owner id: {}", owner)))
}

/// Ids that do not parse cannot name any record.
fn record_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound)
}

fn read_err(e: sqlx::Error) -> StoreError {
    tracing::error!("store read failed: {}", e);
    StoreError::Read(e.to_string())
}

fn write_err(e: sqlx::Error) -> StoreError {
    tracing::error!("store write failed: {}", e);
    StoreError::Write(e.to_string())
}

impl DocumentStore for PgStore {
    async fn insert_lead(&self, owner: &str, lead: NewLead) -> Result<Lead, StoreError> {
        let owner = owner_id(owner)?;
        let row: LeadRow = sqlx::query_as(
            "INSERT INTO leads (user_id, name, number, remarks) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(owner)
        .bind(&lead.name)
        .bind(&lead.number)
        .bind(&lead.remarks)
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;
        Ok(row.into())
    }

    async fn list_leads(&self, owner: &str) -> Result<Vec<Lead>, StoreError> {
        let owner = owner_id(owner)?;
        let rows: Vec<LeadRow> =
            sqlx::query_as("SELECT * FROM leads WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(owner)
                .fetch_all(&self.pool)
                .await
                .map_err(read_err)?;
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    async fn remove_lead(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        let owner = owner_id(owner)?;
        let id = record_id(id)?;
        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn insert_campaign(
        &self,
        owner: &str,
        campaign: NewCampaign,
    ) -> Result<Campaign, StoreError> {
        let owner = owner_id(owner)?;
        let row: CampaignRow = sqlx::query_as(
            "INSERT INTO campaigns (user_id, name, description, selected_users, status)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(owner)
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(&campaign.selected_users)
        .bind(campaign.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;
        row.try_into()
    }

    async fn list_campaigns(&self, owner: &str) -> Result<Vec<Campaign>, StoreError> {
        let owner = owner_id(owner)?;
        let rows: Vec<CampaignRow> = sqlx::query_as(
            "SELECT * FROM campaigns WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)?;
        rows.into_iter().map(Campaign::try_from).collect()
    }

    async fn modify_campaign(
        &self,
        owner: &str,
        id: &str,
        update: CampaignUpdate,
    ) -> Result<Campaign, StoreError> {
        let owner = owner_id(owner)?;
        let id = record_id(id)?;
        let row: Option<CampaignRow> = sqlx::query_as(
            "UPDATE campaigns SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                selected_users = COALESCE($5, selected_users),
                status = COALESCE($6, status),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(update.name)
        .bind(update.description)
        .bind(update.selected_users)
        .bind(update.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?;

        row.ok_or(StoreError::NotFound)?.try_into()
    }

    async fn remove_campaign(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        let owner = owner_id(owner)?;
        let id = record_id(id)?;
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_owners(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(read_err)?;
        Ok(count.max(0) as u64)
    }
}
