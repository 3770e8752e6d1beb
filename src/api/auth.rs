//! `/auth` endpoints: login, registration, and password/email flows.

use reqwest::Method;
use serde_json::json;

use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{MessageResponse, NewUser, Token, User};

pub struct AuthApi<'a> {
    http: &'a HttpClient,
}

impl<'a> AuthApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// `POST /auth/login`, OAuth2 password form. The email travels in the
    /// `username` field.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors; bad credentials come back as a status error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let form = RequestBody::Form(vec![
            ("username".to_owned(), email.to_owned()),
            ("password".to_owned(), password.to_owned()),
        ]);
        self.http
            .send_json(Method::POST, "/auth/login", Some(form), RequestOptions::default())
            .await
    }

    /// `POST /auth/register`. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors, including validation failures.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let body = RequestBody::json(user)?;
        self.http
            .send_json(Method::POST, "/auth/register", Some(body), RequestOptions::default())
            .await
    }

    /// `POST /auth/forgot-password`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let body = RequestBody::Json(json!({ "email": email }));
        self.http
            .send_json(Method::POST, "/auth/forgot-password", Some(body), RequestOptions::default())
            .await
    }

    /// `POST /auth/reset-password` with the emailed reset token.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let body = RequestBody::Json(json!({ "token": token, "password": password }));
        self.http
            .send_json(Method::POST, "/auth/reset-password", Some(body), RequestOptions::default())
            .await
    }

    /// `POST /auth/verify-email`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        let body = RequestBody::Json(json!({ "token": token }));
        self.http
            .send_json(Method::POST, "/auth/verify-email", Some(body), RequestOptions::default())
            .await
    }

    /// `POST /auth/change-password`. Requires an authenticated session.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<MessageResponse, ApiError> {
        let body = RequestBody::Json(json!({
            "current_password": current_password,
            "new_password": new_password,
        }));
        self.http
            .send_json(Method::POST, "/auth/change-password", Some(body), RequestOptions::default())
            .await
    }
}
