pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod sheets;
pub mod validate;

mod memory;
pub use memory::MemoryStore;

pub use config::{DashboardConfig, SessionConfig, SheetsConfig};
pub use error::StoreError;
pub use models::{
    Analytics, Campaign, CampaignStatus, CampaignUpdate, Lead, NewCampaign, NewLead, SheetLead,
};
pub use repo::{DocumentStore, Repository};
pub use sheets::ValueRange;
pub use validate::{
    dedupe_ids, validate_campaign, validate_campaign_update, validate_lead, validate_phone,
};
