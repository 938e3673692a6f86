//! Authentication session: token persistence and sign-up/sign-in/logout.
//!
//! `SessionManager` is the single source of truth for "is this client signed
//! in" and the only writer of the token keys in the [`TokenStore`]. Mutations
//! are serialized per instance; reads never take the lock.

mod remote;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::error::{Error, Result};
use crate::storage::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::util::require_text;

pub use remote::{AuthApi, GraphqlAuthApi};

const EVENT_CAPACITY: usize = 16;

/// Token pair issued by sign-up, sign-in and refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for SignUpInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SignUpInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SignInInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    remote: Arc<dyn AuthApi>,
    authenticated: AtomicBool,
    write_lock: Mutex<()>,
    events: broadcast::Sender<bool>,
}

impl SessionManager {
    /// Build a manager over existing storage; a held access token means signed in.
    pub fn new(store: Arc<dyn TokenStore>, remote: Arc<dyn AuthApi>) -> Self {
        let authenticated = read_token(store.as_ref(), ACCESS_TOKEN_KEY).is_some();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        tracing::debug!(authenticated, "Session restored from storage");
        Self {
            store,
            remote,
            authenticated: AtomicBool::new(authenticated),
            write_lock: Mutex::new(()),
            events,
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Credentials> {
        let input = SignUpInput {
            email: require_text(email, "Email")?,
            password: require_password(password)?,
            name: require_text(display_name, "Name")?,
        };

        let _guard = self.write_lock.lock().await;
        let credentials = self
            .remote
            .sign_up(&input)
            .await
            .map_err(Error::into_authentication_failure)?;
        self.persist(&credentials)?;
        self.transition(true);
        tracing::info!("Signed up and started session");
        Ok(credentials)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials> {
        let input = SignInInput {
            email: require_text(email, "Email")?,
            password: require_password(password)?,
        };

        let _guard = self.write_lock.lock().await;
        let credentials = self
            .remote
            .sign_in(&input)
            .await
            .map_err(Error::into_authentication_failure)?;
        self.persist(&credentials)?;
        self.transition(true);
        tracing::info!("Signed in");
        Ok(credentials)
    }

    /// Rotate the token pair with the stored refresh token.
    ///
    /// Only ever called on request; nothing refreshes tokens automatically.
    pub async fn refresh_tokens(&self) -> Result<Credentials> {
        let _guard = self.write_lock.lock().await;
        let refresh_token = self.refresh_token().ok_or(Error::NotSignedIn)?;
        let credentials = self.remote.refresh_tokens(&refresh_token).await?;
        self.persist(&credentials)?;
        self.transition(true);
        tracing::info!("Rotated session tokens");
        Ok(credentials)
    }

    /// End the session. Local state is cleared whatever the server says.
    pub async fn logout(&self) {
        let _guard = self.write_lock.lock().await;
        if self.access_token().is_some() {
            if let Err(error) = self.remote.logout().await {
                tracing::warn!(
                    "Remote logout failed, clearing local session anyway: {}",
                    error
                );
            }
        } else {
            tracing::debug!("No access token held, skipping remote logout");
        }

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            self.clear_key(key);
        }

        // The flag follows whatever storage still holds.
        let authenticated = self.access_token().is_some();
        self.transition(authenticated);
        if authenticated {
            tracing::error!("Logout could not clear the stored access token");
        } else {
            tracing::info!("Logged out");
        }
    }

    /// Pure read of persisted storage.
    pub fn access_token(&self) -> Option<String> {
        read_token(self.store.as_ref(), ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        read_token(self.store.as_ref(), REFRESH_TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// Receive the new authentication flag after every completed mutation.
    ///
    /// Exactly one value is sent per sign-up, sign-in, refresh or logout,
    /// plus one when a failed write leaves storage in a different state.
    /// Receivers that fall more than a few events behind see `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<bool> {
        self.events.subscribe()
    }

    /// Write both tokens or neither.
    fn persist(&self, credentials: &Credentials) -> Result<()> {
        if credentials.access_token.trim().is_empty() {
            return Err(Error::MalformedResponse(
                "server issued an empty access token".to_string(),
            ));
        }

        let previous = (
            self.store.get(ACCESS_TOKEN_KEY)?,
            self.store.get(REFRESH_TOKEN_KEY)?,
        );
        let written = self
            .store
            .set(ACCESS_TOKEN_KEY, &credentials.access_token)
            .and_then(|()| {
                self.store
                    .set(REFRESH_TOKEN_KEY, &credentials.refresh_token)
            });

        if let Err(error) = written {
            tracing::warn!(
                "Failed to persist tokens, restoring previous pair: {}",
                error
            );
            if let Err(restore_error) = self.restore(previous) {
                tracing::warn!("Failed to restore previous tokens: {}", restore_error);
            }
            let authenticated = self.access_token().is_some();
            if authenticated != self.is_authenticated() {
                self.transition(authenticated);
            }
            return Err(error);
        }
        Ok(())
    }

    fn restore(&self, (access, refresh): (Option<String>, Option<String>)) -> Result<()> {
        for (key, value) in [(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)] {
            match value {
                Some(value) => self.store.set(key, &value)?,
                None => self.store.remove(key)?,
            }
        }
        Ok(())
    }

    /// Remove a token, blanking it when removal fails.
    fn clear_key(&self, key: &str) {
        let Err(error) = self.store.remove(key) else {
            return;
        };
        tracing::warn!("Failed to remove {} from storage: {}", key, error);
        if let Err(error) = self.store.set(key, "") {
            tracing::warn!("Failed to blank {} in storage: {}", key, error);
        }
    }

    fn transition(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::SeqCst);
        // No receivers is fine.
        let _ = self.events.send(authenticated);
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Gate for operations that need a signed-in session.
pub fn require_authenticated(session: &SessionManager) -> Result<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(Error::NotSignedIn)
    }
}

fn require_password(password: &str) -> Result<String> {
    if password.trim().is_empty() {
        return Err(Error::InvalidInput("Password is required".to_string()));
    }
    Ok(password.to_string())
}

pub(crate) fn read_token(store: &dyn TokenStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|value| !value.trim().is_empty()),
        Err(error) => {
            tracing::warn!("Failed to read {} from storage: {}", key, error);
            None
        }
    }
}

#[cfg(test)]
mod tests;
