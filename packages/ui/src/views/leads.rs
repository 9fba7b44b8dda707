use dioxus::prelude::*;
use store::{Lead, NewLead};

use crate::components::{Button, ButtonVariant, Input, Label, TextArea};
use crate::icons::{FaFloppyDisk, FaRotate, FaTrash, FaUserPlus};
use crate::notice::{Notice, NoticeBanner};
use crate::session::OwnerSession;
use crate::views::ConfirmDialog;
use crate::Icon;

/// Lead screen: capture form and the owner's lead list.
#[component]
pub fn LeadsView(session: OwnerSession) -> Element {
    let mut form = use_signal(NewLead::default);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut submitting = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Lead>::None);

    let mut leads =
        use_resource(move || async move { api::get_leads().await.map_err(|e| e.to_string()) });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        // Checked again on the server; this only gives immediate feedback.
        let lead = match store::validate_lead(&form()) {
            Ok(lead) => lead,
            Err(e) => {
                notice.set(Some(Notice::error(e.to_string())));
                return;
            }
        };

        spawn(async move {
            submitting.set(true);
            notice.set(None);
            match api::add_lead(lead).await {
                Ok(_) => {
                    notice.set(Some(Notice::success("Lead saved successfully!")));
                    form.set(NewLead::default());
                    leads.restart();
                }
                Err(e) => {
                    tracing::error!("Failed to save lead: {}", e);
                    notice.set(Some(Notice::error(format!("Failed to save lead: {}", e))));
                }
            }
            submitting.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(lead) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        spawn(async move {
            match api::delete_lead(lead.id.clone()).await {
                Ok(()) => {
                    notice.set(Some(Notice::success("Lead deleted successfully!")));
                    leads.restart();
                }
                Err(e) => {
                    tracing::error!("Failed to delete lead {}: {}", lead.id, e);
                    notice.set(Some(Notice::error(format!("Failed to delete lead: {}", e))));
                }
            }
        });
    };

    let listing = leads.read().clone();
    let count = match listing {
        Some(Ok(ref list)) => list.len(),
        _ => 0,
    };

    rsx! {
        div {
            class: "screen",

            div {
                class: "screen-header",
                div {
                    h1 { "Lead Generation" }
                    p { class: "screen-subtitle", "Capture and manage leads for {session.display_name()}" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: listing.is_none(),
                    onclick: move |_| leads.restart(),
                    Icon { icon: FaRotate, width: 14, height: 14 }
                    "Refresh"
                }
            }

            div {
                class: "lead-content",

                div {
                    class: "card",
                    div {
                        class: "card-header",
                        Icon { icon: FaUserPlus, width: 20, height: 20 }
                        h2 { "Add New Lead" }
                    }
                    form {
                        class: "form",
                        onsubmit: handle_submit,

                        div {
                            class: "form-group",
                            Label { html_for: "lead-name", "Name *" }
                            Input {
                                id: "lead-name",
                                placeholder: "Enter lead name",
                                value: form().name,
                                oninput: move |evt: FormEvent| form.write().name = evt.value(),
                            }
                        }
                        div {
                            class: "form-group",
                            Label { html_for: "lead-number", "Phone Number *" }
                            Input {
                                id: "lead-number",
                                r#type: "tel",
                                placeholder: "Enter 10-digit number",
                                value: form().number,
                                oninput: move |evt: FormEvent| form.write().number = evt.value(),
                            }
                        }
                        div {
                            class: "form-group",
                            Label { html_for: "lead-remarks", "Remarks" }
                            TextArea {
                                id: "lead-remarks",
                                placeholder: "Add any additional notes or remarks",
                                value: form().remarks,
                                oninput: move |evt: FormEvent| form.write().remarks = evt.value(),
                            }
                        }

                        NoticeBanner { notice: notice() }

                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: submitting(),
                            Icon { icon: FaFloppyDisk, width: 14, height: 14 }
                            if submitting() { "Saving..." } else { "Save Lead" }
                        }
                    }
                }

                div {
                    class: "card",
                    div { class: "card-header", h2 { "All Leads ({count})" } }
                    match listing {
                        None => rsx! { div { class: "loading-state", "Loading leads..." } },
                        Some(Err(err)) => rsx! { div { class: "notice notice-error", "{err}" } },
                        Some(Ok(list)) if list.is_empty() => rsx! {
                            div {
                                class: "empty-state",
                                p { "No leads yet" }
                                span { "Start by adding your first lead" }
                            }
                        },
                        Some(Ok(list)) => rsx! {
                            div {
                                class: "leads-grid",
                                for lead in list {
                                    LeadCard {
                                        key: "{lead.id}",
                                        lead: lead.clone(),
                                        on_delete: move |lead| pending_delete.set(Some(lead)),
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }

        if let Some(lead) = pending_delete() {
            ConfirmDialog {
                title: "Delete lead",
                message: format!("Are you sure you want to delete lead \"{}\"?", lead.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn LeadCard(lead: Lead, on_delete: EventHandler<Lead>) -> Element {
    let added = lead.created_at.format("%Y-%m-%d").to_string();
    let target = lead.clone();

    rsx! {
        div {
            class: "lead-card",
            div {
                class: "lead-header",
                h3 { "{lead.name}" }
                div {
                    class: "lead-actions",
                    span { class: "lead-date", "{added}" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Delete lead",
                        onclick: move |_| on_delete.call(target.clone()),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }
            div {
                class: "lead-details",
                p { strong { "Phone: " } "{lead.number}" }
                if !lead.remarks.is_empty() {
                    p { class: "lead-remarks", strong { "Remarks: " } "{lead.remarks}" }
                }
            }
        }
    }
}
