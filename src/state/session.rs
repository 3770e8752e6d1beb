//! Authentication session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is built at process start and handed to every view
//! by reference. Views read it through [`SessionStore::snapshot`] or a
//! [`SessionStore::subscribe`] receiver and mutate it only through the
//! operations below.
//!
//! DESIGN
//! ======
//! The session lives in a `tokio::sync::watch` channel. Each operation
//! suspends only at its HTTP calls and publishes its outcome when the
//! response resolves, so overlapping calls are not ordered: the last
//! response to arrive wins. `pending` counts in-flight calls and drives
//! the busy flag.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`SessionError`], carrying the normalized display
//! message and the originating [`ApiError`]. A failed operation leaves the
//! state where it was before the call.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::credential::CredentialStore;
use crate::api::Api;
use crate::net::error::ApiError;
use crate::net::types::{NewUser, User, UserUpdate};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const HYDRATE_FAILED: &str = "Could not restore your session. Please log in again.";
pub const PROFILE_UPDATE_FAILED: &str = "Profile update failed. Please try again.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: a stored credential is being resolved into a user.
    Hydrating,
    Anonymous,
    Authenticated(User),
}

/// Snapshot published to views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
    /// Number of session operations currently awaiting the backend.
    pub pending: usize,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Hydrating | SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Hydrating || self.pending > 0
    }
}

/// Failed session operation.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SessionError {
    /// Normalized, user-facing message.
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl SessionError {
    fn new(source: ApiError, default_message: &str) -> Self {
        Self { message: source.normalized(default_message), source }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Marks one operation in flight for as long as it lives, including when
/// the owning future is dropped mid-call.
struct PendingGuard<'a> {
    tx: &'a watch::Sender<Session>,
}

impl<'a> PendingGuard<'a> {
    fn enter(tx: &'a watch::Sender<Session>) -> Self {
        tx.send_modify(|session| session.pending += 1);
        Self { tx }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.tx.send_modify(|session| session.pending = session.pending.saturating_sub(1));
    }
}

#[derive(Clone)]
pub struct SessionStore {
    api: Api,
    credentials: Arc<dyn CredentialStore>,
    tx: Arc<watch::Sender<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.tx.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// New store in [`SessionState::Hydrating`]. `credentials` must be the
    /// store the adapter inside `api` reads from.
    #[must_use]
    pub fn new(api: Api, credentials: Arc<dyn CredentialStore>) -> Self {
        let (tx, _rx) = watch::channel(Session { state: SessionState::Hydrating, pending: 0 });
        Self { api, credentials, tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Current session, reconciled with the credential store.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.reconcile();
        self.tx.borrow().clone()
    }

    /// Receiver that observes every published session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.reconcile();
        self.tx.subscribe()
    }

    /// A 401 elsewhere removes the credential without going through the
    /// store; an authenticated session without one is really anonymous.
    fn reconcile(&self) {
        if self.credentials.load().is_some() {
            return;
        }
        self.tx.send_if_modified(|session| {
            if session.is_authenticated() {
                session.state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
    }

    fn set_state(&self, state: SessionState) {
        self.tx.send_modify(|session| session.state = state);
    }

    /// Resolve a stored credential into a user. Without a credential, or if
    /// the backend rejects it, the session becomes anonymous and the
    /// credential is removed.
    ///
    /// # Errors
    ///
    /// Returns the failed user lookup as a [`SessionError`] so callers can
    /// react to an expired credential. The session is already anonymous by
    /// then.
    pub async fn hydrate(&self) -> Result<Session, SessionError> {
        self.set_state(SessionState::Hydrating);

        if self.credentials.load().is_none() {
            self.set_state(SessionState::Anonymous);
            return Ok(self.snapshot());
        }

        match self.api.users().me().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session hydrated");
                self.set_state(SessionState::Authenticated(user));
                Ok(self.snapshot())
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored credential rejected; starting anonymous");
                self.credentials.clear();
                self.set_state(SessionState::Anonymous);
                Err(SessionError::new(e, HYDRATE_FAILED))
            }
        }
    }

    /// Exchange email and password for a credential, persist it, then load
    /// the current user.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] with a normalized message. The session is
    /// left as it was: no credential from this attempt is kept and, unless
    /// the backend rejected it with a 401, the previous one is restored.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let _pending = PendingGuard::enter(&self.tx);

        let token = self.api.auth().login(email, password).await.map_err(|e| {
            tracing::warn!(error = %e, "login failed");
            SessionError::new(e, LOGIN_FAILED)
        })?;
        let previous = self.credentials.load();
        self.credentials.save(&token.access_token);

        match self.api.users().me().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "logged in");
                self.set_state(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login succeeded but user lookup failed");
                // A 401 has already cleared the store.
                if !e.is_unauthorized() {
                    match previous.as_deref() {
                        Some(token) => self.credentials.save(token),
                        None => self.credentials.clear(),
                    }
                }
                Err(SessionError::new(e, LOGIN_FAILED))
            }
        }
    }

    /// Create an account. Never logs in: the session stays as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] with a normalized message.
    pub async fn register(&self, user: &NewUser) -> Result<User, SessionError> {
        let _pending = PendingGuard::enter(&self.tx);

        self.api.auth().register(user).await.map_err(|e| {
            tracing::warn!(error = %e, "registration failed");
            SessionError::new(e, REGISTER_FAILED)
        })
    }

    /// Drop the credential and become anonymous.
    pub fn logout(&self) {
        self.credentials.clear();
        self.set_state(SessionState::Anonymous);
        tracing::debug!("logged out");
    }

    /// Update the current user's profile. On success an authenticated
    /// session picks up the returned user.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] with a normalized message; the session is
    /// unchanged.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, SessionError> {
        let _pending = PendingGuard::enter(&self.tx);

        let user = self.api.users().update_me(update).await.map_err(|e| {
            tracing::warn!(error = %e, "profile update failed");
            SessionError::new(e, PROFILE_UPDATE_FAILED)
        })?;

        let updated = user.clone();
        self.tx.send_if_modified(|session| {
            if session.is_authenticated() {
                session.state = SessionState::Authenticated(updated);
                true
            } else {
                false
            }
        });
        Ok(user)
    }
}
