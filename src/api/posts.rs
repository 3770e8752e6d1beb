//! `/posts` endpoints.

use reqwest::Method;

use super::segment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{NewPost, Post, PostQuery, PostSummary, PostUpdate};

pub struct PostsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> PostsApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// `GET /posts` with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn list(&self, query: &PostQuery) -> Result<Vec<PostSummary>, ApiError> {
        self.http.get("/posts", RequestOptions::with_query(query)?).await
    }

    /// `GET /posts/{slug}`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown slugs.
    pub async fn by_slug(&self, slug: &str) -> Result<Post, ApiError> {
        let path = format!("/posts/{}", segment(slug));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// `GET /posts/id/{id}`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown ids.
    pub async fn by_id(&self, id: &str) -> Result<Post, ApiError> {
        let path = format!("/posts/id/{}", segment(id));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// `POST /posts`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors, including validation failures.
    pub async fn create(&self, post: &NewPost) -> Result<Post, ApiError> {
        let body = RequestBody::json(post)?;
        self.http
            .send_json(Method::POST, "/posts", Some(body), RequestOptions::default())
            .await
    }

    /// `PUT /posts/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn update(&self, id: &str, update: &PostUpdate) -> Result<Post, ApiError> {
        let body = RequestBody::json(update)?;
        let path = format!("/posts/{}", segment(id));
        self.http
            .send_json(Method::PUT, &path, Some(body), RequestOptions::default())
            .await
    }

    /// `DELETE /posts/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/posts/{}", segment(id));
        self.http
            .send_empty(Method::DELETE, &path, None, RequestOptions::default())
            .await
    }

    /// `POST /posts/{id}/like`. Returns the post with its new like count.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn like(&self, id: &str) -> Result<Post, ApiError> {
        let path = format!("/posts/{}/like", segment(id));
        self.http
            .send_json(Method::POST, &path, None, RequestOptions::default())
            .await
    }
}
