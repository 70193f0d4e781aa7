//! Client route paths and the authentication guard.

use crate::session::{AuthStatus, Session};

pub const HOME_PATH: &str = "/";
pub const HOME_ALIAS_PATH: &str = "/home";
pub const LOGIN_PATH: &str = "/log-in";
pub const SIGNUP_PATH: &str = "/sign-up";
pub const DONATE_PATH: &str = "/donate-now";
pub const PROFILE_PATH: &str = "/profile";

/// What a guarded route should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity check still running
    Placeholder,
    Render,
    /// Send the user to login, remembering where they were headed
    RedirectToLogin { from: String },
}

pub fn guard(session: &Session, requested_path: &str) -> GuardDecision {
    match session.status() {
        AuthStatus::Loading => GuardDecision::Placeholder,
        AuthStatus::SignedIn(_) => GuardDecision::Render,
        AuthStatus::SignedOut => GuardDecision::RedirectToLogin {
            from: return_target(Some(requested_path)),
        },
    }
}

/// Where to send the user after login or signup.
///
/// Only internal absolute paths are honoured; the auth pages themselves
/// and anything else fall back to the home page.
pub fn return_target(from: Option<&str>) -> String {
    let Some(path) = from.map(str::trim).filter(|path| !path.is_empty()) else {
        return HOME_PATH.to_string();
    };
    if !path.starts_with('/') || path.starts_with("//") || path.contains("://") {
        return HOME_PATH.to_string();
    }
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    if bare == LOGIN_PATH || bare == SIGNUP_PATH {
        return HOME_PATH.to_string();
    }
    path.to_string()
}
