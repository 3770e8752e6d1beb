//! HTTP client adapter for the blog backend.
//!
//! ARCHITECTURE
//! ============
//! Every facade call funnels through [`HttpClient::request`]. The adapter
//! resolves the base URL once, defaults the body type to JSON, and reads the
//! stored credential on every request (never caching it), so a login or a
//! 401 elsewhere takes effect on the very next call.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any endpoint clears the stored credential and surfaces as
//! [`ApiError::Unauthorized`]. Navigation is left to the caller (see
//! `crate::navigation`). There are no retries: one attempt per call.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::config::ClientConfig;
use crate::state::credential::CredentialStore;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Outbound request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON (the default content type).
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize `value` into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `value` cannot be serialized.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Flatten a serializable struct into query parameters. `None` fields
    /// are dropped and list fields repeat their key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `params` is not a flat object.
    pub fn with_query<T: Serialize>(params: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ApiError::InvalidRequest("query parameters must be an object".to_owned()));
        };

        let mut query = Vec::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(rendered) = query_scalar(&key, item)? {
                            query.push((key.clone(), rendered));
                        }
                    }
                }
                other => {
                    if let Some(rendered) = query_scalar(&key, other)? {
                        query.push((key, rendered));
                    }
                }
            }
        }
        Ok(Self { query })
    }
}

fn query_scalar(key: &str, value: Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(ApiError::InvalidRequest(format!("query parameter `{key}` is not a scalar")))
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Shared HTTP adapter. Cheap to clone; clones share the connection pool
/// and the credential store.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build an adapter for `config`, reading credentials from `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("http client build failed: {e}")))?;

        Ok(Self { http, base_url: Arc::from(config.base_url.as_str()), credentials })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Send one request and return the successful response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when no response arrives.
    /// - [`ApiError::Unauthorized`] on 401, after clearing the credential.
    /// - [`ApiError::NotFound`] / [`ApiError::Status`] on other failures.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = self.credentials.load() {
            request = request.bearer_auth(token);
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        request = match body {
            Some(RequestBody::Json(json)) => request.json(&json),
            Some(RequestBody::Form(fields)) => request.form(&fields),
            None => request,
        };

        tracing::debug!(%method, path, "api request");
        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "api transport failure");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw_body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.credentials.clear();
            tracing::warn!(%method, path, "unauthorized response; stored credential cleared");
        } else {
            tracing::debug!(%method, path, status = status.as_u16(), "api request failed");
        }
        Err(ApiError::from_status(status.as_u16(), &raw_body))
    }

    /// Send a request and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::request`], plus [`ApiError::Decode`] if the body
    /// does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body, options).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is irrelevant (e.g. 204).
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::request`].
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<(), ApiError> {
        self.request(method, path, body, options).await?;
        Ok(())
    }

    /// `GET path` decoded as `T`.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::send_json`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        self.send_json(Method::GET, path, None, options).await
    }
}
