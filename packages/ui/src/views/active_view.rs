use dioxus::prelude::*;

use crate::session::OwnerSession;
use crate::sidebar::AppSidebar;
use crate::views::{CampaignsView, LeadsView, OverviewView};

/// The screen shown in the dashboard's main area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveView {
    #[default]
    Overview,
    Leads,
    Campaigns,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Overview, ActiveView::Leads, ActiveView::Campaigns];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Overview => "Dashboard",
            ActiveView::Leads => "Lead Intelligence",
            ActiveView::Campaigns => "Campaigns",
        }
    }

    /// Stable key used by the sidebar's list rendering.
    pub fn key(&self) -> &'static str {
        match self {
            ActiveView::Overview => "dashboard",
            ActiveView::Leads => "leads",
            ActiveView::Campaigns => "campaigns",
        }
    }

    pub fn render(self, session: OwnerSession) -> Element {
        match self {
            ActiveView::Overview => render_overview(session),
            ActiveView::Leads => render_leads(session),
            ActiveView::Campaigns => render_campaigns(session),
        }
    }
}

fn render_overview(session: OwnerSession) -> Element {
    rsx! { OverviewView { session } }
}

fn render_leads(session: OwnerSession) -> Element {
    rsx! { LeadsView { session } }
}

fn render_campaigns(session: OwnerSession) -> Element {
    rsx! { CampaignsView { session } }
}

const DASHBOARD_CSS: Asset = asset!("/assets/styling/dashboard.css");

/// Sidebar plus the active screen for one signed-in owner.
#[component]
pub fn DashboardShell(
    session: OwnerSession,
    #[props(default)] initial: ActiveView,
) -> Element {
    let mut active = use_signal(move || initial);

    rsx! {
        document::Stylesheet { href: DASHBOARD_CSS }

        div {
            class: "dashboard-shell",
            AppSidebar {
                session: session.clone(),
                active: active(),
                on_select: move |view| active.set(view),
            }
            main {
                class: "dashboard-main",
                {active().render(session.clone())}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_labels_are_distinct() {
        for (i, a) in ActiveView::ALL.iter().enumerate() {
            for b in &ActiveView::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_overview_is_default() {
        assert_eq!(ActiveView::default(), ActiveView::Overview);
        assert_eq!(ActiveView::ALL[0], ActiveView::default());
    }
}
