//! Identity provider client (Firebase Identity Toolkit REST API).

use std::fmt;
use std::sync::{Arc, Mutex};

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::IdentityEndpoints;
use crate::util::{normalize_base_url, unix_timestamp_now};

const EXPIRY_SKEW_SECONDS: i64 = 60;
const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Identity provider is not configured for this build.")]
    NotConfigured,
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

impl AuthError {
    /// Message suitable for a toast: the provider's error code in
    /// `auth/...` form when one is known, otherwise the error text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(code) => friendly_code(code).map_or_else(|| code.clone(), str::to_string),
            other => other.to_string(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

pub trait SessionPersistence: Clone + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-local session store, used where no secure storage exists.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<AuthSession>>>,
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Account operations the signup, login and profile flows depend on.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn update_profile(
        &self,
        session: &AuthSession,
        display_name: &str,
        photo_url: &str,
    ) -> AuthResult<AuthSession>;
    async fn sign_out(&self) -> AuthResult<()>;
}

#[derive(Clone)]
pub struct FirebaseAuthClient<S: SessionPersistence> {
    identity_url: String,
    token_url: String,
    api_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> FirebaseAuthClient<S> {
    pub fn new(endpoints: &IdentityEndpoints, store: S) -> AuthResult<Self> {
        let identity_url = normalize_base_url(&endpoints.identity_base_url, "Identity URL")
            .map_err(AuthError::InvalidConfiguration)?;
        let token_url = normalize_base_url(&endpoints.token_base_url, "Token URL")
            .map_err(AuthError::InvalidConfiguration)?;
        let api_key = endpoints.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Firebase API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            identity_url,
            token_url,
            api_key,
            client: Client::builder().build()?,
            store,
        })
    }

    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self.refresh_session(&stored_session).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let response: AccountResponse = self
            .send(self.identity_request("accounts:signUp").json(&payload))
            .await?;
        let session = response.into_session(None)?;
        self.store.save_session(&session)?;
        Ok(session)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let response: AccountResponse = self
            .send(
                self.identity_request("accounts:signInWithPassword")
                    .json(&payload),
            )
            .await?;
        let session = response.into_session(None)?;
        self.store.save_session(&session)?;
        Ok(session)
    }

    pub async fn refresh_session(&self, session: &AuthSession) -> AuthResult<AuthSession> {
        if session.refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty".to_string(),
            ));
        }

        let request = self
            .client
            .post(format!("{}/token", self.token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ]);
        let response: TokenResponse = self.send(request).await?;
        let refreshed = AuthSession {
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: expires_at_from(response.expires_in.as_deref()),
            user: session.user.clone(),
        };
        self.store.save_session(&refreshed)?;
        Ok(refreshed)
    }

    /// Sets the display name and photo. An expired session is refreshed
    /// first; the returned session carries the fresh tokens.
    pub async fn update_display_profile(
        &self,
        session: &AuthSession,
        display_name: &str,
        photo_url: &str,
    ) -> AuthResult<AuthSession> {
        let refreshed;
        let session = if session.is_expired() {
            tracing::debug!("Refreshing expired session before profile update");
            refreshed = self.refresh_session(session).await?;
            &refreshed
        } else {
            session
        };

        let payload = serde_json::json!({
            "idToken": session.id_token,
            "displayName": display_name,
            "photoUrl": photo_url,
            "returnSecureToken": true,
        });
        let response: AccountResponse = self
            .send(self.identity_request("accounts:update").json(&payload))
            .await?;
        let updated = response.into_session(Some(session))?;
        self.store.save_session(&updated)?;
        Ok(updated)
    }

    /// Clears the persisted session; the provider has no server-side logout.
    pub fn sign_out_local(&self) -> AuthResult<()> {
        self.store.clear_session()
    }

    fn identity_request(&self, action: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/{action}", self.identity_url))
            .query(&[("key", self.api_key.as_str())])
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> AuthResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<T>().await?)
    }
}

impl<S: SessionPersistence> IdentityProvider for FirebaseAuthClient<S> {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.sign_up(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.sign_in_with_password(email, password).await
    }

    async fn update_profile(
        &self,
        session: &AuthSession,
        display_name: &str,
        photo_url: &str,
    ) -> AuthResult<AuthSession> {
        self.update_display_profile(session, display_name, photo_url)
            .await
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.sign_out_local()
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

fn expires_at_from(expires_in: Option<&str>) -> i64 {
    let lifetime = expires_in
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECONDS);
    unix_timestamp_now().saturating_add(lifetime)
}

fn friendly_code(code: &str) -> Option<&'static str> {
    let code = match code {
        "EMAIL_EXISTS" => "auth/email-already-in-use",
        "INVALID_EMAIL" => "auth/invalid-email",
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
            "auth/invalid-credential"
        }
        "USER_DISABLED" => "auth/user-disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
        "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" => {
            "auth/user-token-expired"
        }
        "OPERATION_NOT_ALLOWED" => "auth/operation-not-allowed",
        _ if code.starts_with("WEAK_PASSWORD") => "auth/weak-password",
        _ => return None,
    };
    Some(code)
}

/// Account-style response shared by signUp, signInWithPassword and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    profile_picture: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<String>,
}

impl AccountResponse {
    fn into_session(self, previous: Option<&AuthSession>) -> AuthResult<AuthSession> {
        let uid = self
            .local_id
            .or_else(|| previous.map(|session| session.user.uid.clone()))
            .ok_or_else(|| AuthError::Api("Auth response did not include a user id".to_string()))?;
        let id_token = self
            .id_token
            .or_else(|| previous.map(|session| session.id_token.clone()));
        let refresh_token = self
            .refresh_token
            .or_else(|| previous.map(|session| session.refresh_token.clone()));
        let (Some(id_token), Some(refresh_token)) = (id_token, refresh_token) else {
            return Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            ));
        };
        let expires_at = match (self.expires_in.as_deref(), previous) {
            (None, Some(previous)) => previous.expires_at,
            (expires_in, _) => expires_at_from(expires_in),
        };
        let user = AuthUser {
            uid,
            email: self
                .email
                .or_else(|| previous.and_then(|session| session.user.email.clone())),
            display_name: self
                .display_name
                .or_else(|| previous.and_then(|session| session.user.display_name.clone())),
            photo_url: self
                .photo_url
                .or(self.profile_picture)
                .or_else(|| previous.and_then(|session| session.user.photo_url.clone())),
        };

        Ok(AuthSession {
            id_token,
            refresh_token,
            expires_at,
            user,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorResponse {
    error: FirebaseErrorBody,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    message: Option<String>,
}

fn parse_api_error(status: u16, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<FirebaseErrorResponse>(body) {
        if let Some(message) = payload.error.message {
            // "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account..." keeps only the code
            let code = message.split(" : ").next().unwrap_or(&message).trim();
            if !code.is_empty() {
                return code.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("{} ({status})", crate::util::compact_text(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    use super::*;

    fn endpoints(server: &MockServer) -> IdentityEndpoints {
        IdentityEndpoints {
            identity_base_url: server.url("/v1"),
            token_base_url: server.url("/securetoken"),
            api_key: "test-key".to_string(),
        }
    }

    fn sample_session(expires_at: i64) -> AuthSession {
        AuthSession {
            id_token: "secret-id-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at,
            user: AuthUser {
                uid: "uid-1".to_string(),
                email: Some("rahim@example.com".to_string()),
                display_name: Some("Rahim".to_string()),
                photo_url: None,
            },
        }
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let rendered = format!("{:?}", sample_session(1_700_000_000));
        assert!(!rendered.contains("secret-id-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn parse_api_error_keeps_provider_code() {
        let body = r#"{"error": {"code": 400, "message": "TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled"}}"#;
        assert_eq!(parse_api_error(400, body), "TOO_MANY_ATTEMPTS_TRY_LATER");
        assert_eq!(parse_api_error(502, ""), "HTTP 502");
    }

    #[test]
    fn user_message_maps_known_codes() {
        assert_eq!(
            AuthError::Api("EMAIL_EXISTS".to_string()).user_message(),
            "auth/email-already-in-use"
        );
        assert_eq!(
            AuthError::Api("WEAK_PASSWORD : Password should be at least 6 characters".to_string())
                .user_message(),
            "auth/weak-password"
        );
        assert_eq!(
            AuthError::Api("SOMETHING_NEW".to_string()).user_message(),
            "SOMETHING_NEW"
        );
    }

    #[test]
    fn update_response_without_tokens_keeps_previous_session() {
        let previous = sample_session(1_900_000_000);
        let response = AccountResponse {
            local_id: Some("uid-1".to_string()),
            email: None,
            display_name: Some("Rahim Uddin".to_string()),
            photo_url: Some("https://i.ibb.co/r.png".to_string()),
            profile_picture: None,
            id_token: None,
            refresh_token: None,
            expires_in: None,
        };
        let session = response.into_session(Some(&previous)).unwrap();
        assert_eq!(session.id_token, previous.id_token);
        assert_eq!(session.expires_at, previous.expires_at);
        assert_eq!(session.user.email.as_deref(), Some("rahim@example.com"));
        assert_eq!(session.user.display_name.as_deref(), Some("Rahim Uddin"));
    }

    #[tokio::test]
    async fn sign_up_saves_session() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:signUp")
                .query_param("key", "test-key");
            then.status(200).json_body(serde_json::json!({
                "localId": "uid-9",
                "email": "karim@example.com",
                "idToken": "id-9",
                "refreshToken": "refresh-9",
                "expiresIn": "3600"
            }));
        });
        let store = MemorySessionStore::default();
        let client = FirebaseAuthClient::new(&endpoints(&server), store.clone()).unwrap();

        let session = client
            .create_account("karim@example.com", "secret1")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(session.user.uid, "uid-9");
        assert!(!session.is_expired());
        assert_eq!(store.load_session().unwrap(), Some(session));
    }

    #[tokio::test]
    async fn sign_in_surfaces_provider_error_code() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/accounts:signInWithPassword");
            then.status(400).json_body(serde_json::json!({
                "error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}
            }));
        });
        let client =
            FirebaseAuthClient::new(&endpoints(&server), MemorySessionStore::default()).unwrap();

        let error = client
            .sign_in("karim@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "auth/invalid-credential");
    }

    #[tokio::test]
    async fn restore_refreshes_expired_session() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/securetoken/token")
                .body_contains("grant_type=refresh_token");
            then.status(200).json_body(serde_json::json!({
                "id_token": "fresh-id",
                "refresh_token": "fresh-refresh",
                "expires_in": "3600",
                "user_id": "uid-1"
            }));
        });
        let store = MemorySessionStore::default();
        store.save_session(&sample_session(0)).unwrap();
        let client = FirebaseAuthClient::new(&endpoints(&server), store.clone()).unwrap();

        let restored = client.restore_session().await.unwrap().unwrap();

        mock.assert();
        assert_eq!(restored.id_token, "fresh-id");
        assert_eq!(restored.user.display_name.as_deref(), Some("Rahim"));
    }

    #[tokio::test]
    async fn restore_clears_session_when_refresh_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/securetoken/token");
            then.status(400).json_body(serde_json::json!({
                "error": {"code": 400, "message": "TOKEN_EXPIRED"}
            }));
        });
        let store = MemorySessionStore::default();
        store.save_session(&sample_session(0)).unwrap();
        let client = FirebaseAuthClient::new(&endpoints(&server), store.clone()).unwrap();

        assert_eq!(client.restore_session().await.unwrap(), None);
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[tokio::test]
    async fn profile_update_refreshes_expired_session_first() {
        let server = MockServer::start();
        let refresh = server.mock(|when, then| {
            when.method(POST)
                .path("/securetoken/token")
                .body_contains("refresh_token=secret-refresh-token");
            then.status(200).json_body(serde_json::json!({
                "id_token": "fresh-id",
                "refresh_token": "fresh-refresh",
                "expires_in": "3600"
            }));
        });
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:update")
                .json_body_partial(r#"{"idToken": "fresh-id", "displayName": "Rahim Uddin"}"#);
            then.status(200).json_body(serde_json::json!({
                "localId": "uid-1",
                "displayName": "Rahim Uddin",
                "photoUrl": "https://i.ibb.co/r.png"
            }));
        });
        let store = MemorySessionStore::default();
        let client = FirebaseAuthClient::new(&endpoints(&server), store.clone()).unwrap();

        let updated = client
            .update_profile(&sample_session(0), "Rahim Uddin", "https://i.ibb.co/r.png")
            .await
            .unwrap();

        refresh.assert();
        update.assert();
        assert_eq!(updated.id_token, "fresh-id");
        assert_eq!(updated.refresh_token, "fresh-refresh");
        assert!(!updated.is_expired());
        assert_eq!(updated.user.display_name.as_deref(), Some("Rahim Uddin"));
        assert_eq!(store.load_session().unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn profile_update_with_live_session_skips_refresh() {
        let server = MockServer::start();
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/securetoken/token");
            then.status(500);
        });
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:update")
                .json_body_partial(r#"{"idToken": "secret-id-token"}"#);
            then.status(200).json_body(serde_json::json!({"localId": "uid-1"}));
        });
        let client =
            FirebaseAuthClient::new(&endpoints(&server), MemorySessionStore::default()).unwrap();

        let live = sample_session(unix_timestamp_now() + 3600);
        let updated = client.update_profile(&live, "Rahim", "").await.unwrap();

        refresh.assert_hits(0);
        update.assert();
        assert_eq!(updated.id_token, "secret-id-token");
    }

    #[tokio::test]
    async fn blank_credentials_never_reach_the_provider() {
        let client = FirebaseAuthClient::new(
            &IdentityEndpoints {
                identity_base_url: "http://127.0.0.1:9".to_string(),
                token_base_url: "http://127.0.0.1:9".to_string(),
                api_key: "key".to_string(),
            },
            MemorySessionStore::default(),
        )
        .unwrap();
        let error = client.sign_in("  ", "secret1").await.unwrap_err();
        assert_eq!(error.user_message(), "Email is required");
    }
}
