//! `/categories` endpoints.

use reqwest::Method;

use super::segment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{Category, CategoryNode, CategoryUpdate, NewCategory, Page};

pub struct CategoriesApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CategoriesApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// `GET /categories`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn list(&self, page: Page) -> Result<Vec<Category>, ApiError> {
        self.http.get("/categories", RequestOptions::with_query(&page)?).await
    }

    /// `GET /categories/nested`: top-level categories with their children.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn nested(&self) -> Result<Vec<CategoryNode>, ApiError> {
        self.http.get("/categories/nested", RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown ids.
    pub async fn by_id(&self, id: &str) -> Result<Category, ApiError> {
        let path = format!("/categories/{}", segment(id));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown slugs.
    pub async fn by_slug(&self, slug: &str) -> Result<Category, ApiError> {
        let path = format!("/categories/slug/{}", segment(slug));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// Propagates adapter errors; non-admins get a status error.
    pub async fn create(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let body = RequestBody::json(category)?;
        self.http
            .send_json(Method::POST, "/categories", Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn update(&self, id: &str, update: &CategoryUpdate) -> Result<Category, ApiError> {
        let body = RequestBody::json(update)?;
        let path = format!("/categories/{}", segment(id));
        self.http
            .send_json(Method::PUT, &path, Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/categories/{}", segment(id));
        self.http
            .send_empty(Method::DELETE, &path, None, RequestOptions::default())
            .await
    }
}
