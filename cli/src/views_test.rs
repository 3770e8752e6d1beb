use serde_json::{Value, json};

use super::*;

fn profile() -> Value {
    json!({"id": "u-1", "username": "ada", "full_name": "Ada Lovelace", "created_at": "2024-05-01T12:00:00"})
}

fn summary(slug: &str, published: bool, views: i64, likes: i64) -> PostSummary {
    serde_json::from_value(json!({
        "id": format!("id-{slug}"),
        "title": format!("Post {slug}"),
        "slug": slug,
        "summary": null,
        "is_published": published,
        "is_featured": false,
        "view_count": views,
        "like_count": likes,
        "reading_time": 4,
        "published_at": if published { json!("2024-05-02T09:00:00") } else { Value::Null },
        "created_at": "2024-05-01T08:00:00",
        "author": profile()
    }))
    .unwrap()
}

fn thread(id: &str, approved: bool, replies: Value) -> Value {
    json!({
        "id": id,
        "content": format!("comment {id}"),
        "post_id": "p-1",
        "user_id": "u-2",
        "is_approved": approved,
        "like_count": 0,
        "created_at": "2024-05-03T10:00:00",
        "user": {"id": "u-2", "username": "babbage", "created_at": "2024-05-01T12:00:00"},
        "replies": replies
    })
}

fn user_fixture() -> User {
    serde_json::from_value(json!({
        "id": "u-1",
        "email": "ada@example.test",
        "username": "ada",
        "full_name": null,
        "bio": "Writes about engines.",
        "is_active": true,
        "is_superuser": false,
        "is_verified": false,
        "created_at": "2024-05-01T12:00:00"
    }))
    .unwrap()
}

// =============================================================
// Posts
// =============================================================

#[test]
fn post_list_marks_drafts_and_uses_publish_date() {
    let out = post_list(&[summary("a", true, 1, 2), summary("b", false, 0, 0)]);
    assert!(out.starts_with("Post a  [a]\n  by Ada Lovelace on 2024-05-02, 4 min read, 2 likes"));
    assert!(out.contains("Post b  [b]  (draft)\n  by Ada Lovelace on 2024-05-01"));
}

#[test]
fn empty_post_list() {
    assert_eq!(post_list(&[]), "No posts found.");
}

#[test]
fn post_detail_renders_nested_comments() {
    let post: Post = serde_json::from_value(json!({
        "id": "p-1",
        "title": "Hello",
        "slug": "hello",
        "content": "Body text.",
        "is_published": true,
        "is_featured": false,
        "author_id": "u-1",
        "view_count": 10,
        "like_count": 3,
        "reading_time": 1,
        "created_at": "2024-05-02T08:00:00",
        "author": profile(),
        "tags": [{"id": "t-1", "name": "engines", "slug": "engines", "created_at": "2024-05-01T12:00:00"}]
    }))
    .unwrap();
    let comments: Vec<CommentThread> =
        serde_json::from_value(json!([thread("c-1", true, json!([thread("c-2", false, json!([]))]))])).unwrap();

    let out = post_detail(&post, &comments);

    assert!(out.starts_with("Hello\n=====\nby Ada Lovelace on 2024-05-02, 1 min read, 10 views, 3 likes\n"));
    assert!(out.contains("tags: engines"));
    assert!(out.contains("Comments (2)"));
    assert!(out.contains("babbage on 2024-05-03 [c-1]\n  comment c-1\n  babbage on 2024-05-03 [c-2] (pending approval)\n    comment c-2"));
}

#[test]
fn dashboard_totals() {
    let out = dashboard(&user_fixture(), &[summary("a", true, 5, 1), summary("b", false, 2, 0)]);
    assert!(out.starts_with("Dashboard for ada\n2 posts (1 published, 1 drafts), 7 views, 1 likes\n\n"));
}

#[test]
fn not_found_message() {
    assert_eq!(not_found("Post"), "Post Not Found\nThe requested post does not exist or has been removed.");
}

// =============================================================
// Taxonomy & users
// =============================================================

#[test]
fn category_tree_indents_children() {
    let nodes: Vec<CategoryNode> = serde_json::from_value(json!([{
        "id": "c-0", "name": "Programming", "slug": "programming", "post_count": 3,
        "created_at": "2024-05-01T12:00:00",
        "subcategories": [{
            "id": "c-1", "name": "Rust", "slug": "rust", "post_count": 2,
            "created_at": "2024-05-01T12:00:00"
        }]
    }]))
    .unwrap();
    assert_eq!(category_tree(&nodes), "Programming [programming] (3 posts)\n  Rust [rust] (2 posts)");
    assert_eq!(category_tree(&[]), "No categories.");
}

#[test]
fn tags_inline() {
    let list: Vec<Tag> = serde_json::from_value(json!([
        {"id": "t-1", "name": "engines", "slug": "engines", "post_count": 4, "created_at": "2024-05-01T12:00:00"},
        {"id": "t-2", "name": "looms", "slug": "looms", "created_at": "2024-05-01T12:00:00"}
    ]))
    .unwrap();
    assert_eq!(tags(&list), "#engines (4)  #looms (0)");
}

#[test]
fn user_card_flags_unverified_email() {
    assert_eq!(user(&user_fixture()), "ada (@ada)\nada@example.test\nWrites about engines.\nEmail not verified.");
}
