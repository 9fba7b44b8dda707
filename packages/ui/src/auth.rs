//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::session::OwnerSession;
use crate::Icon;

/// How often the provider re-checks the server session.
const SESSION_CHECK_SECS: u64 = 30;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// Whether the server is reachable (last session check succeeded).
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
            online: true,
        }
    }

    pub fn signed_out(online: bool) -> Self {
        Self {
            user: None,
            loading: false,
            online,
        }
    }

    /// An owner session for the signed-in user, if any.
    pub fn session(&self) -> Option<OwnerSession> {
        self.user.clone().map(OwnerSession::new)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

async fn sleep_secs(secs: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_secs(secs)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
}

/// Provider component that republishes the server session to the app.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(Some(user)) => auth_state.set(AuthState::signed_in(user)),
            Ok(None) => auth_state.set(AuthState::signed_out(true)),
            Err(e) => {
                tracing::error!("Failed to load session: {}", e);
                auth_state.set(AuthState::signed_out(false));
            }
        }
    });

    // Session-change check: picks up expiry or sign-out in another tab.
    use_effect(move || {
        spawn(async move {
            loop {
                sleep_secs(SESSION_CHECK_SECS).await;

                if auth_state.peek().loading {
                    continue;
                }
                match api::get_current_user().await {
                    Ok(user) => {
                        let current = auth_state.peek().clone();
                        if current.user != user || !current.online {
                            auth_state.set(AuthState {
                                user,
                                loading: false,
                                online: true,
                            });
                        }
                    }
                    Err(_) => {
                        if auth_state.peek().online {
                            auth_state.write().online = false;
                        }
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that signs the current user out and returns to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                let online = auth_state().online;
                auth_state.set(AuthState::signed_out(online));
                #[cfg(target_arch = "wasm32")]
                {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/login");
                    }
                }
            }
            Err(e) => tracing::error!("Failed to log out: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
