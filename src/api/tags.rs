//! `/tags` endpoints.

use reqwest::Method;

use super::segment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{NewTag, Page, Tag, TagUpdate};

pub struct TagsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> TagsApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn list(&self, page: Page) -> Result<Vec<Tag>, ApiError> {
        self.http.get("/tags", RequestOptions::with_query(&page)?).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown ids.
    pub async fn by_id(&self, id: &str) -> Result<Tag, ApiError> {
        let path = format!("/tags/{}", segment(id));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown slugs.
    pub async fn by_slug(&self, slug: &str) -> Result<Tag, ApiError> {
        let path = format!("/tags/slug/{}", segment(slug));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn create(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let body = RequestBody::json(tag)?;
        self.http
            .send_json(Method::POST, "/tags", Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn update(&self, id: &str, update: &TagUpdate) -> Result<Tag, ApiError> {
        let body = RequestBody::json(update)?;
        let path = format!("/tags/{}", segment(id));
        self.http
            .send_json(Method::PUT, &path, Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/tags/{}", segment(id));
        self.http
            .send_empty(Method::DELETE, &path, None, RequestOptions::default())
            .await
    }
}
