//! Inline success/error banner for form results.

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };

    rsx! {
        div {
            class: match notice.level {
                NoticeLevel::Success => "notice notice-success",
                NoticeLevel::Error => "notice notice-error",
            },
            "{notice.text}"
        }
    }
}
