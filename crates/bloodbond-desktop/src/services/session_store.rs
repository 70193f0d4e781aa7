//! Persisted sign-in session, kept in the OS keyring.

use bloodbond_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use keyring::Entry;

const SERVICE: &str = "bloodbond";
const ACCOUNT: &str = "firebase_session";

#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    service: &'static str,
    account: &'static str,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self {
            service: SERVICE,
            account: ACCOUNT,
        }
    }
}

fn storage_error(error: keyring::Error) -> AuthError {
    AuthError::SecureStorage(error.to_string())
}

impl KeyringSessionStore {
    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(self.service, self.account).map_err(storage_error)
    }
}

impl SessionPersistence for KeyringSessionStore {
    /// A payload that no longer parses is dropped and treated as signed out.
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let raw = match self.entry()?.get_password() {
            Ok(raw) => raw,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(error) => return Err(storage_error(error)),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!("Discarding unreadable stored session: {}", error);
                self.clear_session()?;
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&serialized)
            .map_err(storage_error)
    }

    fn clear_session(&self) -> AuthResult<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }
}
