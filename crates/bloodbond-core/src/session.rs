//! Signed-in session shared across the app.
//!
//! Created once at the application root and handed to consumers; nothing
//! here is global.

use crate::auth::{AuthSession, AuthUser};

/// Identity state as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Persisted session not yet restored
    #[default]
    Loading,
    SignedIn(AuthSession),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    status: AuthStatus,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle the start-up identity check.
    ///
    /// Only the first call out of `Loading` has an effect; returns whether
    /// this call resolved the session.
    pub fn resolve(&mut self, restored: Option<AuthSession>) -> bool {
        if self.status != AuthStatus::Loading {
            return false;
        }
        self.status = restored.map_or(AuthStatus::SignedOut, AuthStatus::SignedIn);
        true
    }

    /// Record a successful login, signup, or profile update.
    pub fn sign_in(&mut self, session: AuthSession) {
        self.status = AuthStatus::SignedIn(session);
    }

    pub fn sign_out(&mut self) {
        self.status = AuthStatus::SignedOut;
    }

    pub const fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Loading)
    }

    pub const fn current(&self) -> Option<&AuthSession> {
        match &self.status {
            AuthStatus::SignedIn(session) => Some(session),
            AuthStatus::Loading | AuthStatus::SignedOut => None,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.current().map(|session| &session.user)
    }

    pub fn email(&self) -> Option<&str> {
        self.user().and_then(|user| user.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::session_for;

    #[test]
    fn starts_loading() {
        let session = Session::new();
        assert!(session.is_loading());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn resolves_exactly_once() {
        let mut session = Session::new();
        assert!(session.resolve(None));
        assert_eq!(session.status(), &AuthStatus::SignedOut);

        assert!(!session.resolve(Some(session_for("late@example.com"))));
        assert_eq!(session.status(), &AuthStatus::SignedOut);
    }

    #[test]
    fn login_during_loading_wins_over_late_restore() {
        let mut session = Session::new();
        session.sign_in(session_for("rahim@example.com"));

        assert!(!session.resolve(None));
        assert_eq!(session.email(), Some("rahim@example.com"));
    }

    #[test]
    fn sign_out_does_not_return_to_loading() {
        let mut session = Session::new();
        session.resolve(Some(session_for("rahim@example.com")));
        session.sign_out();
        assert!(!session.is_loading());
        assert_eq!(session.current(), None);
    }
}
