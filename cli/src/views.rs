//! Plain-text renderings of backend resources.

#[cfg(test)]
#[path = "views_test.rs"]
mod views_test;

use std::fmt::Write as _;

use quill::net::types::{Category, CategoryNode, CommentThread, Post, PostSummary, Tag, User, UserProfile};

/// Date part of a backend timestamp.
fn date(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

fn author_name(author: &UserProfile) -> &str {
    author
        .full_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&author.username)
}

pub fn not_found(what: &str) -> String {
    format!("{what} Not Found\nThe requested {} does not exist or has been removed.", what.to_lowercase())
}

pub fn user(user: &User) -> String {
    let mut out = format!("{} (@{})\n{}", user.display_name(), user.username, user.email);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = write!(out, "\n{bio}");
    }
    if !user.is_verified {
        out.push_str("\nEmail not verified.");
    }
    out
}

// =============================================================================
// POSTS
// =============================================================================

pub fn post_list(posts: &[PostSummary]) -> String {
    if posts.is_empty() {
        return "No posts found.".to_owned();
    }
    let mut out = String::new();
    for post in posts {
        let when = post.published_at.as_deref().unwrap_or(&post.created_at);
        let _ = write!(out, "{}  [{}]", post.title, post.slug);
        if !post.is_published {
            out.push_str("  (draft)");
        }
        let _ = writeln!(
            out,
            "\n  by {} on {}, {} min read, {} likes",
            author_name(&post.author),
            date(when),
            post.reading_time,
            post.like_count
        );
        if let Some(summary) = post.summary.as_deref().filter(|s| !s.is_empty()) {
            let _ = writeln!(out, "  {summary}");
        }
    }
    out.trim_end().to_owned()
}

pub fn post_detail(post: &Post, comments: &[CommentThread]) -> String {
    let mut out = format!("{}\n{}\n", post.title, "=".repeat(post.title.chars().count()));
    let when = post.published_at.as_deref().unwrap_or(&post.created_at);
    let _ = writeln!(
        out,
        "by {} on {}, {} min read, {} views, {} likes",
        author_name(&post.author),
        date(when),
        post.reading_time,
        post.view_count,
        post.like_count
    );
    if let Some(category) = &post.category {
        let _ = writeln!(out, "category: {}", category.name);
    }
    if !post.tags.is_empty() {
        let names: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
        let _ = writeln!(out, "tags: {}", names.join(", "));
    }
    let _ = write!(out, "\n{}\n\nComments ({})\n", post.content.trim_end(), count_comments(comments));
    if comments.is_empty() {
        out.push_str("No comments yet.");
    } else {
        out.push_str(&comment_threads(comments));
    }
    out.trim_end().to_owned()
}

fn count_comments(threads: &[CommentThread]) -> usize {
    threads.iter().map(|t| 1 + count_comments(&t.replies)).sum()
}

pub fn comment_threads(threads: &[CommentThread]) -> String {
    let mut out = String::new();
    write_threads(&mut out, threads, 0);
    out.trim_end().to_owned()
}

fn write_threads(out: &mut String, threads: &[CommentThread], depth: usize) {
    let indent = "  ".repeat(depth);
    for thread in threads {
        let comment = &thread.comment;
        let _ = write!(
            out,
            "{indent}{} on {} [{}]",
            author_name(&comment.user),
            date(&comment.created_at),
            comment.id
        );
        if !comment.is_approved {
            out.push_str(" (pending approval)");
        }
        let _ = writeln!(out, "\n{indent}  {}", comment.content);
        write_threads(out, &thread.replies, depth + 1);
    }
}

/// Author dashboard: totals followed by every post, drafts included.
pub fn dashboard(user: &User, posts: &[PostSummary]) -> String {
    let published = posts.iter().filter(|p| p.is_published).count();
    let views: i64 = posts.iter().map(|p| p.view_count).sum();
    let likes: i64 = posts.iter().map(|p| p.like_count).sum();
    format!(
        "Dashboard for {}\n{} posts ({published} published, {} drafts), {views} views, {likes} likes\n\n{}",
        user.display_name(),
        posts.len(),
        posts.len() - published,
        post_list(posts)
    )
}

// =============================================================================
// TAXONOMY
// =============================================================================

pub fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories.".to_owned();
    }
    categories
        .iter()
        .map(|c| format!("{} [{}] ({} posts)", c.name, c.slug, c.post_count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn category_tree(nodes: &[CategoryNode]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes, 0);
    if out.is_empty() {
        return "No categories.".to_owned();
    }
    out.trim_end().to_owned()
}

fn write_nodes(out: &mut String, nodes: &[CategoryNode], depth: usize) {
    for node in nodes {
        let c = &node.category;
        let _ = writeln!(out, "{}{} [{}] ({} posts)", "  ".repeat(depth), c.name, c.slug, c.post_count);
        write_nodes(out, &node.subcategories, depth + 1);
    }
}

pub fn tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags.".to_owned();
    }
    tags.iter()
        .map(|t| format!("#{} ({})", t.slug, t.post_count))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Home page: latest posts, then the category and tag sidebars.
pub fn home(posts: &[PostSummary], all_categories: &[Category], popular_tags: &[Tag]) -> String {
    format!(
        "Latest posts\n\n{}\n\nCategories\n{}\n\nPopular tags\n{}",
        post_list(posts),
        categories(all_categories),
        tags(popular_tags)
    )
}
