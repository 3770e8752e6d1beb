//! Resource facades over the HTTP adapter.
//!
//! DESIGN
//! ======
//! One facade per backend resource. Each is a thin borrowed view over the
//! shared [`HttpClient`] that fixes paths, methods, and wire types; none of
//! them holds state, so handing out `api.posts()` per call costs nothing.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod posts;
pub mod tags;
pub mod users;


use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::state::credential::CredentialStore;

pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use comments::CommentsApi;
pub use posts::PostsApi;
pub use tags::TagsApi;
pub use users::UsersApi;

/// Entry point bundling every resource facade.
#[derive(Clone, Debug)]
pub struct Api {
    http: HttpClient,
}

impl Api {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build the adapter from `config` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        HttpClient::new(config, credentials).map(Self::new)
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http)
    }

    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.http)
    }

    #[must_use]
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(&self.http)
    }

    #[must_use]
    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(&self.http)
    }

    #[must_use]
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(&self.http)
    }

    #[must_use]
    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(&self.http)
    }
}

/// Percent-encode a caller-supplied id, slug, or username for use as a
/// single path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
