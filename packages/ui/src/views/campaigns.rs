use dioxus::prelude::*;
use store::{Campaign, CampaignStatus, CampaignUpdate, Lead, NewCampaign};

use crate::components::{Button, ButtonVariant, Input, Label, TextArea};
use crate::icons::{FaBullhorn, FaPlus, FaRotate, FaTrash};
use crate::notice::{Notice, NoticeBanner};
use crate::session::OwnerSession;
use crate::views::{ConfirmDialog, ModalOverlay};
use crate::Icon;

/// Status transitions offered on a campaign card, as (button label, target).
pub fn status_actions(status: CampaignStatus) -> Vec<(&'static str, CampaignStatus)> {
    let mut actions = match status {
        CampaignStatus::Draft => vec![("Launch", CampaignStatus::Active)],
        CampaignStatus::Active => vec![("Pause", CampaignStatus::Paused)],
        CampaignStatus::Paused => vec![("Resume", CampaignStatus::Active)],
        CampaignStatus::Archived => Vec::new(),
    };
    if status != CampaignStatus::Archived {
        actions.push(("Archive", CampaignStatus::Archived));
    }
    actions
}

/// Campaigns of one status, in listing order.
pub fn with_status(campaigns: &[Campaign], status: CampaignStatus) -> Vec<Campaign> {
    campaigns
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect()
}

/// Campaign screen: status tabs, cards and the create dialog.
#[component]
pub fn CampaignsView(session: OwnerSession) -> Element {
    let mut tab = use_signal(|| CampaignStatus::Active);
    let mut show_create = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut pending_delete = use_signal(|| Option::<Campaign>::None);

    let mut campaigns = use_resource(move || async move {
        api::get_campaigns().await.map_err(|e| e.to_string())
    });

    let change_status = move |(id, status): (String, CampaignStatus)| {
        spawn(async move {
            match api::update_campaign(id.clone(), CampaignUpdate::status(status)).await {
                Ok(_) => campaigns.restart(),
                Err(e) => {
                    tracing::error!("Failed to update campaign {}: {}", id, e);
                    notice.set(Some(Notice::error(format!("Failed to update campaign: {}", e))));
                }
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(campaign) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        spawn(async move {
            match api::delete_campaign(campaign.id.clone()).await {
                Ok(()) => {
                    notice.set(Some(Notice::success("Campaign deleted successfully!")));
                    campaigns.restart();
                }
                Err(e) => {
                    tracing::error!("Failed to delete campaign {}: {}", campaign.id, e);
                    notice.set(Some(Notice::error(format!("Failed to delete campaign: {}", e))));
                }
            }
        });
    };

    let listing = campaigns.read().clone();

    rsx! {
        div {
            class: "screen",

            div {
                class: "screen-header",
                div {
                    h1 { "Campaigns" }
                    p { class: "screen-subtitle", "Group leads into outreach campaigns for {session.display_name()}" }
                }
                div {
                    class: "screen-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: listing.is_none(),
                        onclick: move |_| campaigns.restart(),
                        Icon { icon: FaRotate, width: 14, height: 14 }
                        "Refresh"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_create.set(true),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        "New Campaign"
                    }
                }
            }

            NoticeBanner { notice: notice() }

            div {
                class: "tabs",
                for status in CampaignStatus::ALL {
                    button {
                        key: "{status}",
                        class: if tab() == status { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(status),
                        "{status.label()}"
                    }
                }
            }

            match listing {
                None => rsx! { div { class: "loading-state", "Loading campaigns..." } },
                Some(Err(err)) => rsx! { div { class: "notice notice-error", "{err}" } },
                Some(Ok(all)) => {
                    let visible = with_status(&all, tab());
                    if visible.is_empty() {
                        rsx! {
                            div {
                                class: "empty-state",
                                Icon { icon: FaBullhorn, width: 28, height: 28 }
                                p { "No {tab().label().to_lowercase()} campaigns" }
                            }
                        }
                    } else {
                        rsx! {
                            div {
                                class: "campaign-grid",
                                for campaign in visible {
                                    CampaignCard {
                                        key: "{campaign.id}",
                                        campaign: campaign.clone(),
                                        on_status: change_status,
                                        on_delete: move |c| pending_delete.set(Some(c)),
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_create() {
            CreateCampaignDialog {
                on_close: move |_| show_create.set(false),
                on_created: move |campaign: Campaign| {
                    show_create.set(false);
                    tab.set(campaign.status);
                    notice.set(Some(Notice::success("Campaign created successfully!")));
                    campaigns.restart();
                },
            }
        }

        if let Some(campaign) = pending_delete() {
            ConfirmDialog {
                title: "Delete campaign",
                message: format!("Are you sure you want to delete campaign \"{}\"?", campaign.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn CampaignCard(
    campaign: Campaign,
    on_status: EventHandler<(String, CampaignStatus)>,
    on_delete: EventHandler<Campaign>,
) -> Element {
    let created = campaign.created_at.format("%Y-%m-%d").to_string();
    let lead_count = campaign.selected_users.len();
    let target = campaign.clone();

    rsx! {
        div {
            class: "campaign-card",
            div {
                class: "campaign-header",
                h3 { "{campaign.name}" }
                span { class: "badge badge-{campaign.status}", "{campaign.status}" }
            }
            if !campaign.description.is_empty() {
                p { class: "campaign-description", "{campaign.description}" }
            }
            div {
                class: "campaign-meta",
                span { "{lead_count} leads" }
                span { "Created {created}" }
            }
            div {
                class: "campaign-actions",
                for (label, next) in status_actions(campaign.status) {
                    Button {
                        key: "{label}",
                        variant: ButtonVariant::Outline,
                        onclick: {
                            let id = campaign.id.clone();
                            move |_| on_status.call((id.clone(), next))
                        },
                        "{label}"
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete campaign",
                    onclick: move |_| on_delete.call(target.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn CreateCampaignDialog(on_close: EventHandler<()>, on_created: EventHandler<Campaign>) -> Element {
    let mut form = use_signal(NewCampaign::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let leads = use_resource(move || async move { api::get_leads().await.map_err(|e| e.to_string()) });

    let mut toggle_lead = move |id: String| {
        let mut draft = form.write();
        if let Some(pos) = draft.selected_users.iter().position(|s| *s == id) {
            draft.selected_users.remove(pos);
        } else {
            draft.selected_users.push(id);
        }
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let campaign = match store::validate_campaign(&form()) {
            Ok(campaign) => campaign,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        spawn(async move {
            saving.set(true);
            error.set(None);
            match api::add_campaign(campaign).await {
                Ok(created) => on_created.call(created),
                Err(e) => {
                    tracing::error!("Failed to create campaign: {}", e);
                    error.set(Some(format!("Failed to create campaign: {}", e)));
                }
            }
            saving.set(false);
        });
    };

    let lead_state = leads.read().clone();
    let selected = form().selected_users;

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            form {
                class: "modal-body form",
                onsubmit: submit,

                h2 { class: "modal-title", "New Campaign" }

                div {
                    class: "form-group",
                    Label { html_for: "campaign-name", "Name *" }
                    Input {
                        id: "campaign-name",
                        placeholder: "Campaign name",
                        value: form().name,
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }
                }
                div {
                    class: "form-group",
                    Label { html_for: "campaign-description", "Description" }
                    TextArea {
                        id: "campaign-description",
                        placeholder: "What is this campaign about?",
                        rows: 3,
                        value: form().description,
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }
                div {
                    class: "form-group",
                    Label { html_for: "campaign-status", "Status" }
                    select {
                        id: "campaign-status",
                        class: "input",
                        value: "{form().status}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(status) = evt.value().parse::<CampaignStatus>() {
                                form.write().status = status;
                            }
                        },
                        option { value: "draft", "Draft" }
                        option { value: "active", "Active" }
                    }
                }
                div {
                    class: "form-group",
                    span { class: "label", "Leads ({selected.len()} selected)" }
                    div {
                        class: "lead-picker",
                        match lead_state {
                            None => rsx! { div { class: "loading-state", "Loading leads..." } },
                            Some(Err(err)) => rsx! { div { class: "notice notice-error", "{err}" } },
                            Some(Ok(list)) if list.is_empty() => rsx! {
                                div { class: "empty-state", "Add leads first to include them here" }
                            },
                            Some(Ok(list)) => rsx! {
                                for lead in list {
                                    LeadOption {
                                        key: "{lead.id}",
                                        checked: selected.contains(&lead.id),
                                        lead: lead.clone(),
                                        on_toggle: move |id| toggle_lead(id),
                                    }
                                }
                            },
                        }
                    }
                }

                if let Some(err) = error() {
                    div { class: "notice notice-error", "{err}" }
                }

                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Creating..." } else { "Create Campaign" }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
fn LeadOption(lead: Lead, checked: bool, on_toggle: EventHandler<String>) -> Element {
    let id = lead.id.clone();

    rsx! {
        label {
            class: "lead-option",
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            span { class: "lead-option-name", "{lead.name}" }
            span { class: "lead-option-number", "{lead.number}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(status: CampaignStatus) -> Vec<CampaignStatus> {
        status_actions(status).into_iter().map(|(_, s)| s).collect()
    }

    #[test]
    fn test_draft_can_launch_or_archive() {
        assert_eq!(
            targets(CampaignStatus::Draft),
            vec![CampaignStatus::Active, CampaignStatus::Archived]
        );
        assert_eq!(status_actions(CampaignStatus::Draft)[0].0, "Launch");
    }

    #[test]
    fn test_active_and_paused_toggle() {
        assert_eq!(
            targets(CampaignStatus::Active),
            vec![CampaignStatus::Paused, CampaignStatus::Archived]
        );
        assert_eq!(
            targets(CampaignStatus::Paused),
            vec![CampaignStatus::Active, CampaignStatus::Archived]
        );
    }

    #[test]
    fn test_archived_is_terminal() {
        assert!(status_actions(CampaignStatus::Archived).is_empty());
    }

    #[test]
    fn test_with_status_filters() {
        let now = chrono::Utc::now();
        let make = |id: &str, status| Campaign {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            selected_users: Vec::new(),
            status,
            user_id: "owner".to_string(),
            created_at: now,
            updated_at: now,
        };
        let all = vec![
            make("a", CampaignStatus::Active),
            make("b", CampaignStatus::Draft),
            make("c", CampaignStatus::Active),
        ];

        let active: Vec<String> = with_status(&all, CampaignStatus::Active)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(active, vec!["a", "c"]);
        assert!(with_status(&all, CampaignStatus::Archived).is_empty());
    }
}
