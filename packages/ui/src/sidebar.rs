use dioxus::prelude::*;

use crate::icons::{FaBullhorn, FaGauge, FaUserPlus};
use crate::session::OwnerSession;
use crate::views::ActiveView;
use crate::{Icon, LogoutButton};

#[component]
pub fn AppSidebar(
    session: OwnerSession,
    active: ActiveView,
    on_select: EventHandler<ActiveView>,
) -> Element {
    let user = session.user().clone();

    rsx! {
        aside {
            class: "sidebar",

            div {
                class: "sidebar-brand",
                span { class: "sidebar-logo", "LD" }
                span { class: "sidebar-title", "Lead Desk" }
            }

            nav {
                class: "sidebar-nav",
                div { class: "nav-group-label", "MAIN MENU" }
                for view in ActiveView::ALL {
                    button {
                        key: "{view.key()}",
                        class: if view == active { "nav-item active" } else { "nav-item" },
                        onclick: move |_| on_select.call(view),
                        NavIcon { view }
                        span { "{view.label()}" }
                    }
                }
            }

            div {
                class: "sidebar-user",
                span { class: "sidebar-avatar", "{user.initial()}" }
                div {
                    class: "sidebar-user-text",
                    span { class: "sidebar-user-name", "{user.display_name()}" }
                    span { class: "sidebar-user-email", "{user.email}" }
                }
            }
            LogoutButton { class: "nav-item logout" }
        }
    }
}

#[component]
fn NavIcon(view: ActiveView) -> Element {
    match view {
        ActiveView::Overview => rsx! { Icon { icon: FaGauge, width: 16, height: 16 } },
        ActiveView::Leads => rsx! { Icon { icon: FaUserPlus, width: 16, height: 16 } },
        ActiveView::Campaigns => rsx! { Icon { icon: FaBullhorn, width: 16, height: 16 } },
    }
}
