//! Router-aware wrapper that turns an expired session into a redirect.
//!
//! DESIGN
//! ======
//! The HTTP adapter only clears the credential and reports
//! [`ApiError::Unauthorized`]. Views run their calls through
//! [`UnauthorizedRedirect::guard`], which sends the user to the login view
//! whenever that error surfaces and hands the error back untouched, so
//! inline error handling still runs.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::error::ApiError;
use crate::state::session::SessionError;

/// Views a client can show.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    NewPost,
    /// Post detail, by slug.
    Post(String),
    /// Post editor, by post id.
    EditPost(String),
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::NewPost => "/posts/new".to_owned(),
            Self::Post(slug) => format!("/posts/{slug}"),
            Self::EditPost(id) => format!("/posts/{id}/edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}

/// Errors that may stand for a rejected credential.
pub trait AuthFailure {
    fn is_unauthorized(&self) -> bool;
}

impl AuthFailure for ApiError {
    fn is_unauthorized(&self) -> bool {
        ApiError::is_unauthorized(self)
    }
}

impl AuthFailure for SessionError {
    fn is_unauthorized(&self) -> bool {
        self.source.is_unauthorized()
    }
}

// =============================================================================
// REDIRECT
// =============================================================================

#[derive(Clone, Debug)]
pub struct UnauthorizedRedirect<N> {
    navigator: N,
}

impl<N: Navigator> UnauthorizedRedirect<N> {
    #[must_use]
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Await `call`; on an unauthorized failure navigate to
    /// [`Route::Login`]. The result is returned unchanged either way.
    ///
    /// # Errors
    ///
    /// Whatever `call` fails with.
    pub async fn guard<T, E, F>(&self, call: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: AuthFailure,
    {
        let result = call.await;
        if let Err(e) = &result {
            if e.is_unauthorized() {
                tracing::info!("session expired; redirecting to login");
                self.navigator.navigate(Route::Login);
            }
        }
        result
    }
}

// =============================================================================
// RECORDING NAVIGATOR
// =============================================================================

/// Navigator that only remembers where it was sent. Navigating to the
/// current route is a no-op.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.last() != Some(&route) {
            tracing::debug!(route = %route, "navigate");
            history.push(route);
        }
    }
}
