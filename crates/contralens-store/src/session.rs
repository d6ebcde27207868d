//! Mock authentication: one current session mirrored into a durable store.
//!
//! Any username is accepted with the fixed password [`MOCK_PASSWORD`]. The
//! session survives restarts purely by the presence of both persisted slots;
//! the token is never validated against anything.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::{KeyValueStore, StoreError};

pub const AUTH_TOKEN_KEY: &str = "auth-token";
pub const AUTH_USERNAME_KEY: &str = "auth-username";
pub const MOCK_PASSWORD: &str = "test123";

/// Shown to the user when [`SessionManager::login`] returns `Ok(false)`.
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid credentials. Password must be \"test123\".";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Persistence(#[from] StoreError),
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Persistence(_) => "Session storage is unavailable. Your sign-in may not be remembered.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Issues `mock-jwt-<millis>` tokens that never repeat within a process.
///
/// When the clock has not advanced since the last token (or has gone
/// backwards), the previous value plus one is used instead.
pub struct TokenIssuer {
    clock: fn() -> i64,
    last: Option<i64>,
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis())
    }
}

impl TokenIssuer {
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { clock, last: None }
    }

    pub fn issue(&mut self) -> String {
        let now = (self.clock)();
        let stamp = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(stamp);
        format!("mock-jwt-{stamp}")
    }
}

/// Owner of the current session and its persisted mirror.
///
/// Construct once at startup, call [`restore_session`](Self::restore_session)
/// before rendering anything that depends on authentication, and pass the
/// manager to whatever needs it.
pub struct SessionManager<S> {
    store: S,
    current: Option<Session>,
    loading: bool,
    tokens: TokenIssuer,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_token_issuer(store, TokenIssuer::default())
    }

    pub fn with_token_issuer(store: S, tokens: TokenIssuer) -> Self {
        Self {
            store,
            current: None,
            loading: true,
            tokens,
        }
    }

    /// True until [`restore_session`](Self::restore_session) has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted session, if both slots are present and non-empty.
    ///
    /// A missing slot is not an error; the session is simply absent. A
    /// storage fault leaves the session absent and is reported.
    pub async fn restore_session(&mut self) -> Result<Option<&Session>, SessionError> {
        let restored = self.read_persisted().await;
        self.loading = false;
        match restored {
            Ok(session) => {
                match &session {
                    Some(s) => info!(username = %s.username, "restored session"),
                    None => info!("no persisted session"),
                }
                self.current = session;
                Ok(self.current.as_ref())
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted session");
                self.current = None;
                Err(e.into())
            }
        }
    }

    async fn read_persisted(&self) -> Result<Option<Session>, StoreError> {
        let token = self.store.get(AUTH_TOKEN_KEY).await?;
        let username = self.store.get(AUTH_USERNAME_KEY).await?;
        Ok(match (token, username) {
            (Some(token), Some(username)) if !token.is_empty() && !username.is_empty() => {
                Some(Session { username, token })
            }
            _ => None,
        })
    }

    /// Sign in. Returns `Ok(false)` for a wrong password, leaving any existing
    /// session untouched.
    ///
    /// On success the in-memory session is replaced before it is persisted, so
    /// a storage fault is reported while the user stays signed in for this run.
    /// A partial write never survives: both slots are cleared when either fails.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, SessionError> {
        if password != MOCK_PASSWORD {
            info!(username, "login rejected");
            return Ok(false);
        }

        let token = self.tokens.issue();
        self.current = Some(Session {
            username: username.to_string(),
            token: token.clone(),
        });
        info!(username, "logged in");

        if let Err(e) = self.persist(username, &token).await {
            warn!(error = %e, "could not persist session, clearing stored slots");
            let _ = self.store.remove(AUTH_TOKEN_KEY).await;
            let _ = self.store.remove(AUTH_USERNAME_KEY).await;
            return Err(e.into());
        }
        Ok(true)
    }

    async fn persist(&mut self, username: &str, token: &str) -> Result<(), StoreError> {
        self.store.set(AUTH_TOKEN_KEY, token).await?;
        self.store.set(AUTH_USERNAME_KEY, username).await
    }

    /// Sign out. Calling this with no session is a no-op.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(s) = self.current.take() {
            info!(username = %s.username, "logged out");
        }
        let token = self.store.remove(AUTH_TOKEN_KEY).await;
        let username = self.store.remove(AUTH_USERNAME_KEY).await;
        token?;
        username?;
        Ok(())
    }
}
