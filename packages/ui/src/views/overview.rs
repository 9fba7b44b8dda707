use dioxus::prelude::*;
use store::{Analytics, Lead, SheetLead};

use crate::components::{Button, ButtonVariant};
use crate::icons::{FaBullhorn, FaRotate, FaUserPlus, FaUsers};
use crate::session::OwnerSession;
use crate::Icon;

/// Headline figure on the overview: own leads plus imported sheet rows.
pub fn combined_lead_count(analytics: &Analytics, sheet_rows: usize) -> usize {
    analytics.total_leads + sheet_rows
}

/// Overview screen: counters, recent leads and the spreadsheet import.
#[component]
pub fn OverviewView(session: OwnerSession) -> Element {
    let mut analytics =
        use_resource(move || async move { api::get_analytics().await.map_err(|e| e.to_string()) });
    let mut sheet_leads = use_resource(move || async move {
        api::import_sheet_leads().await.map_err(|e| e.to_string())
    });

    let analytics_state = analytics.read().clone();
    let sheets_state = sheet_leads.read().clone();
    let loading = analytics_state.is_none();

    let sheet_count = match sheets_state {
        Some(Ok(ref rows)) => rows.len(),
        _ => 0,
    };

    let (users, leads, campaigns, recent) = match analytics_state {
        Some(Ok(ref a)) => (
            a.total_users.to_string(),
            combined_lead_count(a, sheet_count).to_string(),
            a.total_campaigns.to_string(),
            a.recent_leads.clone(),
        ),
        _ => ("...".to_string(), "...".to_string(), "...".to_string(), Vec::new()),
    };

    rsx! {
        div {
            class: "screen",

            div {
                class: "screen-header",
                div {
                    h1 { "Dashboard Overview" }
                    p {
                        class: "screen-subtitle",
                        "Welcome back, {session.display_name()}! Here's what's happening today."
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: loading,
                    onclick: move |_| {
                        analytics.restart();
                        sheet_leads.restart();
                    },
                    Icon { icon: FaRotate, width: 14, height: 14 }
                    "Refresh"
                }
            }

            if let Some(Err(err)) = &analytics_state {
                div { class: "notice notice-error", "{err}" }
            }

            div {
                class: "stats-grid",
                StatCard {
                    title: "Total Users",
                    value: users,
                    tone: "blue",
                    Icon { icon: FaUsers, width: 22, height: 22 }
                }
                StatCard {
                    title: "Total Leads",
                    value: leads,
                    tone: "green",
                    Icon { icon: FaUserPlus, width: 22, height: 22 }
                }
                StatCard {
                    title: "Campaigns",
                    value: campaigns,
                    tone: "red",
                    Icon { icon: FaBullhorn, width: 22, height: 22 }
                }
            }

            div {
                class: "card",
                div { class: "card-header", h2 { "Recent Leads" } }
                RecentLeadsTable { leads: recent, loading }
            }

            div {
                class: "card",
                div { class: "card-header", h2 { "Imported from spreadsheet ({sheet_count})" } }
                match sheets_state {
                    None => rsx! { div { class: "loading-state", "Loading sheet..." } },
                    Some(Err(err)) => rsx! { div { class: "notice notice-error", "{err}" } },
                    Some(Ok(rows)) => rsx! { SheetLeadsTable { rows } },
                }
            }
        }
    }
}

#[component]
fn StatCard(title: String, value: String, tone: String, children: Element) -> Element {
    rsx! {
        div {
            class: "stat-card stat-{tone}",
            div { class: "stat-icon", {children} }
            div {
                class: "stat-content",
                h3 { "{title}" }
                p { class: "stat-value", "{value}" }
            }
        }
    }
}

#[component]
fn RecentLeadsTable(leads: Vec<Lead>, loading: bool) -> Element {
    if loading {
        return rsx! { div { class: "loading-state", "Loading leads..." } };
    }
    if leads.is_empty() {
        return rsx! { div { class: "empty-state", "No leads yet" } };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Name" }
                    th { "Phone" }
                    th { "Remarks" }
                    th { "Added" }
                }
            }
            tbody {
                for lead in leads {
                    tr {
                        key: "{lead.id}",
                        td { "{lead.name}" }
                        td { "{lead.number}" }
                        td { "{lead.remarks}" }
                        td { {lead.created_at.format("%Y-%m-%d").to_string()} }
                    }
                }
            }
        }
    }
}

#[component]
fn SheetLeadsTable(rows: Vec<SheetLead>) -> Element {
    if rows.is_empty() {
        return rsx! { div { class: "empty-state", "No spreadsheet rows" } };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Name" }
                    th { "Phone" }
                    th { "Remarks" }
                    th { "Timestamp" }
                }
            }
            tbody {
                for (i, row) in rows.into_iter().enumerate() {
                    tr {
                        key: "{i}",
                        td { "{row.name}" }
                        td { "{row.number}" }
                        td { "{row.remarks}" }
                        td { "{row.timestamp}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_count_adds_sheet_rows() {
        let analytics = Analytics {
            total_leads: 3,
            total_users: 10,
            total_campaigns: 1,
            recent_leads: Vec::new(),
        };
        assert_eq!(combined_lead_count(&analytics, 0), 3);
        assert_eq!(combined_lead_count(&analytics, 4), 7);
    }
}
