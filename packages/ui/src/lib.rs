//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod session;
pub use session::OwnerSession;

mod notice;
pub use notice::{Notice, NoticeBanner, NoticeLevel};

mod sidebar;
pub use sidebar::AppSidebar;

pub mod views;
