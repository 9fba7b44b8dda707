mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod active_view;
pub use active_view::{ActiveView, DashboardShell};

mod overview;
pub use overview::{combined_lead_count, OverviewView};

mod leads;
pub use leads::LeadsView;

mod campaigns;
pub use campaigns::{status_actions, with_status, CampaignsView};
