//! The signed-in owner, handed explicitly to every screen.

use api::UserInfo;

/// Created once when a user signs in and dropped on sign-out. Screens take it
/// as a prop instead of reading ambient auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSession {
    user: UserInfo,
}

impl OwnerSession {
    pub fn new(user: UserInfo) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub fn owner_id(&self) -> &str {
        &self.user.id
    }

    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_exposes_owner() {
        let session = OwnerSession::new(UserInfo {
            id: "owner-a".to_string(),
            email: "a@example.test".to_string(),
            company: "A Corp".to_string(),
            joined_at: "2025-03-01T09:00:00+00:00".to_string(),
        });

        assert_eq!(session.display_name(), "A Corp");
        assert_eq!(session.owner_id(), "owner-a");
    }
}
