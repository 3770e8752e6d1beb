//! `/comments` endpoints.

use reqwest::Method;

use super::segment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestBody, RequestOptions};
use crate::net::types::{Comment, CommentThread, CommentUpdate, NewComment, Page};

pub struct CommentsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CommentsApi<'a> {
    #[must_use]
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// `GET /comments/post/{post_id}`: threaded comments of one post.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn for_post(&self, post_id: &str, page: Page) -> Result<Vec<CommentThread>, ApiError> {
        let path = format!("/comments/post/{}", segment(post_id));
        self.http.get(&path, RequestOptions::with_query(&page)?).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for unknown ids.
    pub async fn by_id(&self, id: &str) -> Result<CommentThread, ApiError> {
        let path = format!("/comments/{}", segment(id));
        self.http.get(&path, RequestOptions::default()).await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let body = RequestBody::json(comment)?;
        self.http
            .send_json(Method::POST, "/comments", Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn update(&self, id: &str, update: &CommentUpdate) -> Result<Comment, ApiError> {
        let body = RequestBody::json(update)?;
        let path = format!("/comments/{}", segment(id));
        self.http
            .send_json(Method::PUT, &path, Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/comments/{}", segment(id));
        self.http
            .send_empty(Method::DELETE, &path, None, RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn like(&self, id: &str) -> Result<Comment, ApiError> {
        let path = format!("/comments/{}/like", segment(id));
        self.http
            .send_json(Method::POST, &path, None, RequestOptions::default())
            .await
    }

    /// Moderation: mark a comment approved. Admins and post authors only.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub async fn approve(&self, id: &str) -> Result<Comment, ApiError> {
        let path = format!("/comments/{}/approve", segment(id));
        self.http
            .send_json(Method::POST, &path, None, RequestOptions::default())
            .await
    }
}
