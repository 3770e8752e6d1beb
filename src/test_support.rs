//! Shared test fixtures: backend JSON bodies and an in-process fake backend.

use std::sync::Arc;

use axum::Router;
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::net::http::HttpClient;
use crate::state::credential::{CredentialStore, MemoryCredentialStore};

pub const API_PREFIX: &str = "/api/v1";

// =============================================================================
// FAKE BACKEND
// =============================================================================

/// Serve `routes` under `/api/v1` on an ephemeral local port and return the
/// base URL. The server task lives until the test runtime shuts down.
pub async fn spawn_backend(routes: Router) -> String {
    let app = Router::new().nest(API_PREFIX, routes);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend failed");
    });
    format!("http://{addr}{API_PREFIX}")
}

/// Base URL nothing listens on, for transport-failure tests.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}

pub fn memory_store(token: Option<&str>) -> Arc<MemoryCredentialStore> {
    Arc::new(token.map_or_else(MemoryCredentialStore::new, MemoryCredentialStore::with_token))
}

pub fn client_for(base_url: &str, store: Arc<MemoryCredentialStore>) -> HttpClient {
    let config = ClientConfig::new(base_url).expect("valid base url");
    let credentials: Arc<dyn CredentialStore> = store;
    HttpClient::new(&config, credentials).expect("client builds")
}

/// Extract the bearer token from request headers, if any.
pub fn bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "ada@example.test",
        "username": "ada",
        "full_name": null,
        "bio": "Writes about engines.",
        "avatar_url": null,
        "is_active": true,
        "is_superuser": false,
        "is_verified": true,
        "created_at": "2024-05-01T12:00:00",
        "updated_at": null,
        "last_login": "2024-06-01T08:30:00"
    })
}

pub fn profile_json() -> Value {
    json!({
        "id": "u-1",
        "username": "ada",
        "full_name": "Ada Lovelace",
        "bio": null,
        "avatar_url": null,
        "created_at": "2024-05-01T12:00:00"
    })
}

pub fn category_json(id: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "name": slug.to_uppercase(),
        "slug": slug,
        "description": null,
        "icon": null,
        "color": "#b7410e",
        "parent_id": null,
        "post_count": 2,
        "created_at": "2024-05-01T12:00:00",
        "updated_at": null
    })
}

pub fn tag_json(id: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "name": slug,
        "slug": slug,
        "description": null,
        "color": null,
        "post_count": 1,
        "created_at": "2024-05-01T12:00:00",
        "updated_at": null
    })
}

pub fn post_json(id: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "title": "Hello World",
        "slug": slug,
        "content": "Hello, world! This is the first post.",
        "summary": "A first post.",
        "featured_image": null,
        "is_published": true,
        "is_featured": false,
        "meta_title": null,
        "meta_description": null,
        "meta_keywords": null,
        "category_id": "cat-1",
        "author_id": "u-1",
        "view_count": 10,
        "like_count": 2,
        "reading_time": 3,
        "published_at": "2024-05-02T09:00:00",
        "created_at": "2024-05-02T08:00:00",
        "updated_at": null,
        "author": profile_json(),
        "tags": [tag_json("tag-1", "engines")],
        "category": category_json("cat-1", "rust")
    })
}

pub fn comment_json(id: &str, post_id: &str) -> Value {
    json!({
        "id": id,
        "content": "Great read.",
        "post_id": post_id,
        "user_id": "u-1",
        "parent_id": null,
        "is_approved": true,
        "like_count": 0,
        "created_at": "2024-05-03T10:00:00",
        "updated_at": null,
        "user": profile_json()
    })
}
