use super::*;
use crate::test_support::{comment_json, post_json, user_json};

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_without_optional_fields() {
    let json = serde_json::json!({
        "id": "u-1",
        "email": "ada@example.test",
        "username": "ada",
        "is_active": true,
        "is_superuser": false,
        "created_at": "2024-05-01T12:00:00",
    });
    let user: User = serde_json::from_value(json).unwrap();
    assert_eq!(user.username, "ada");
    assert!(user.full_name.is_none());
    assert!(!user.is_verified);
}

#[test]
fn display_name_prefers_full_name() {
    let mut user: User = serde_json::from_value(user_json()).unwrap();
    user.full_name = Some("Ada Lovelace".to_owned());
    assert_eq!(user.display_name(), "Ada Lovelace");
}

#[test]
fn display_name_falls_back_to_username_when_blank() {
    let mut user: User = serde_json::from_value(user_json()).unwrap();
    user.full_name = Some("  ".to_owned());
    assert_eq!(user.display_name(), "ada");
}

#[test]
fn token_type_defaults_to_bearer() {
    let token: Token = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
    assert_eq!(token.token_type, "bearer");
    assert!(token.expires_at.is_none());
}

// =============================================================
// Partial updates
// =============================================================

#[test]
fn empty_user_update_serializes_to_empty_object() {
    let json = serde_json::to_value(UserUpdate::default()).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn post_update_only_carries_set_fields() {
    let update = PostUpdate {
        title: Some("New title".to_owned()),
        is_published: Some(true),
        tag_ids: Some(vec![]),
        ..PostUpdate::default()
    };
    let json = serde_json::to_value(update).unwrap();
    assert_eq!(json, serde_json::json!({"title": "New title", "is_published": true, "tag_ids": []}));
}

#[test]
fn new_post_always_sends_flags_and_tags() {
    let post = NewPost { title: "Hello".to_owned(), content: "Hello, world!".to_owned(), ..NewPost::default() };
    let json = serde_json::to_value(post).unwrap();
    assert_eq!(json["is_published"], false);
    assert_eq!(json["is_featured"], false);
    assert_eq!(json["tag_ids"], serde_json::json!([]));
    assert!(json.get("slug").is_none());
}

#[test]
fn post_query_skips_unset_filters() {
    let query = PostQuery { limit: Some(10), published_only: Some(false), ..PostQuery::default() };
    let json = serde_json::to_value(query).unwrap();
    assert_eq!(json, serde_json::json!({"limit": 10, "published_only": false}));
}

// =============================================================
// Nested responses
// =============================================================

#[test]
fn post_deserializes_with_tags_and_category() {
    let post: Post = serde_json::from_value(post_json("p-1", "hello-world")).unwrap();
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.author.username, "ada");
    assert_eq!(post.tags.len(), 1);
    assert_eq!(post.category.as_ref().map(|c| c.slug.as_str()), Some("rust"));
}

#[test]
fn post_summary_ignores_detail_only_fields() {
    let summary: PostSummary = serde_json::from_value(post_json("p-1", "hello-world")).unwrap();
    assert_eq!(summary.id, "p-1");
    assert_eq!(summary.reading_time, 3);
}

#[test]
fn category_node_nests_subcategories() {
    let json = serde_json::json!({
        "id": "c-1", "name": "Programming", "slug": "programming", "post_count": 4,
        "created_at": "2024-05-01T12:00:00",
        "subcategories": [
            { "id": "c-2", "name": "Rust", "slug": "rust", "parent_id": "c-1", "post_count": 2,
              "created_at": "2024-05-01T12:00:00" }
        ]
    });
    let node: CategoryNode = serde_json::from_value(json).unwrap();
    assert_eq!(node.category.slug, "programming");
    assert_eq!(node.subcategories.len(), 1);
    assert_eq!(node.subcategories[0].category.parent_id.as_deref(), Some("c-1"));
    assert!(node.subcategories[0].subcategories.is_empty());
}

#[test]
fn comment_thread_nests_replies() {
    let mut json = comment_json("c-1", "p-1");
    json["replies"] = serde_json::json!([comment_json("c-2", "p-1")]);
    let thread: CommentThread = serde_json::from_value(json).unwrap();
    assert_eq!(thread.comment.id, "c-1");
    assert_eq!(thread.replies.len(), 1);
    assert_eq!(thread.replies[0].comment.id, "c-2");
}
