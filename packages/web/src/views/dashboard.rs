use dioxus::prelude::*;
use ui::use_auth;
use ui::views::DashboardShell;

use crate::Route;

/// Signed-in area. Sends anonymous visitors to the login page.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if state.loading {
        return rsx! { div { class: "page-loading", "Loading..." } };
    }

    match state.session() {
        Some(session) => rsx! {
            DashboardShell {
                key: "{session.owner_id()}",
                session,
            }
        },
        None => {
            nav.replace(Route::Login {});
            rsx! {}
        }
    }
}
