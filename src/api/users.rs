//! `/users` endpoints.

use reqwest::Method;

use super::segment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{User, UserProfile, UserUpdate};

pub struct UsersApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UsersApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// `GET /users/me`: resolve the stored credential into a user.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] when the credential is missing or expired.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.http.get("/users/me", RequestOptions::default()).await
    }

    /// `PUT /users/me`. Returns the full updated user.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors, including validation failures.
    pub async fn update_me(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let body = RequestBody::json(update)?;
        self.http
            .send_json(Method::PUT, "/users/me", Some(body), RequestOptions::default())
            .await
    }

    /// `GET /users/{username}`: public profile.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown usernames.
    pub async fn by_username(&self, username: &str) -> Result<UserProfile, ApiError> {
        let path = format!("/users/{}", segment(username));
        self.http.get(&path, RequestOptions::default()).await
    }
}
