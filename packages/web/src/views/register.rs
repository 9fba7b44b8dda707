//! Registration page view with email/password form.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::{use_auth, AuthState};

use crate::Route;

/// Matches the server-side minimum.
const MIN_PASSWORD_LEN: usize = 8;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut company = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let c = company().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if c.is_empty() {
                error.set(Some("Company name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
                return;
            }
            if p != cp {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            match api::register(e, p, c).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Create Account" }
                p { class: "auth-subtitle", "Start capturing leads for your team" }

                form {
                    class: "auth-form",
                    onsubmit: handle_register,

                    if let Some(err) = error() {
                        div { class: "notice notice-error", "{err}" }
                    }

                    div {
                        Label { html_for: "register-company", "Company" }
                        Input {
                            id: "register-company",
                            placeholder: "Company name",
                            value: company(),
                            oninput: move |evt: FormEvent| company.set(evt.value()),
                        }
                    }
                    div {
                        Label { html_for: "register-email", "Email" }
                        Input {
                            id: "register-email",
                            r#type: "email",
                            placeholder: "you@company.com",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        Label { html_for: "register-password", "Password" }
                        Input {
                            id: "register-password",
                            r#type: "password",
                            placeholder: "At least 8 characters",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    div {
                        Label { html_for: "register-confirm", "Confirm password" }
                        Input {
                            id: "register-confirm",
                            r#type: "password",
                            placeholder: "Repeat password",
                            value: confirm_password(),
                            oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                        }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
