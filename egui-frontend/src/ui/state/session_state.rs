//! # Session State Module
//!
//! Who is signed in, and whether the app is still finding out.
//!
//! Every sign-in or sign-out starts a new session epoch. Data requested under an
//! older epoch belongs to a session that no longer exists and is never applied.

use shared::User;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Current identity; None is the valid signed-out state, not an error
    pub user: Option<User>,

    /// True while login or the initial user/category load is in progress
    pub loading: bool,

    epoch: u64,
}

impl SessionState {
    /// Starts in the loading state; the app resolves the session on startup
    pub fn new() -> Self {
        Self {
            user: None,
            loading: true,
            epoch: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn sign_in(&mut self, user: User) {
        let same_user = self.user.as_ref().map(|u| u.id == user.id).unwrap_or(false);
        if !same_user {
            self.epoch += 1;
        }
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.epoch += 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::test_user;

    #[test]
    fn test_new_session_is_loading_and_signed_out() {
        let session = SessionState::new();
        assert!(session.loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_in_and_out_advance_epoch() {
        let mut session = SessionState::new();
        let start = session.epoch();

        session.sign_in(test_user());
        assert!(session.is_authenticated());
        assert_eq!(session.epoch(), start + 1);

        // Reloading the same user keeps the session
        session.sign_in(test_user());
        assert_eq!(session.epoch(), start + 1);

        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(session.epoch(), start + 2);
    }
}
