//! Terminal client for the Quill blogging platform.
//!
//! Each subcommand is one view: it hydrates the session from the stored
//! credential, runs its backend calls through the unauthorized-redirect
//! guard, and prints either a text rendering or raw JSON (`--json`).

mod forms;
mod views;


use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use quill::navigation::{Navigator, Route, UnauthorizedRedirect};
use quill::net::types::{
    CommentUpdate, NewComment, NewPost, Page, PostQuery, PostUpdate, User, UserUpdate,
};
use quill::{Api, ApiError, ClientConfig, CredentialStore, FileCredentialStore, SessionError, SessionStore};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::forms::RegistrationForm;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] quill::config::ConfigError),
    #[error("client setup failed: {0}")]
    Setup(ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{0}")]
    Failed(String),
    #[error("{0}")]
    NotFound(String),
    #[error("not logged in; run `quill login` first")]
    NotLoggedIn,
    #[error("{0}")]
    Invalid(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
}

impl CliError {
    /// Inline failure for a view: the normalized backend message, or
    /// `default_message` when the backend said nothing useful.
    fn api(err: &ApiError, default_message: &str) -> Self {
        Self::Failed(err.normalized(default_message))
    }
}

#[derive(Parser, Debug)]
#[command(name = "quill", about = "Quill blogging platform terminal client")]
struct Cli {
    /// Backend base URL, including the `/api/v1` prefix.
    #[arg(long, env = "QUILL_API_URL")]
    api_url: Option<String>,

    /// File holding the stored credential.
    #[arg(long, env = "QUILL_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    #[arg(long, env = "QUILL_CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: Option<u64>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    Logout,
    Whoami,
    Profile(ProfileArgs),
    Password(PasswordCommand),
    VerifyEmail {
        token: String,
    },
    /// Latest posts with the category and tag sidebars.
    Home {
        #[arg(long)]
        category_id: Option<String>,
        #[arg(long)]
        tag_id: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// The current user's posts, drafts included.
    Dashboard,
    Post(PostCommand),
    Comment(CommentCommand),
    Categories {
        #[arg(long, default_value_t = false)]
        nested: bool,
    },
    Tags {
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    full_name: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    avatar_url: Option<String>,
}

#[derive(Args, Debug)]
struct PasswordCommand {
    #[command(subcommand)]
    command: PasswordSubcommand,
}

#[derive(Subcommand, Debug)]
enum PasswordSubcommand {
    Forgot {
        #[arg(long)]
        email: String,
    },
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    Change {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

#[derive(Args, Debug)]
struct PostCommand {
    #[command(subcommand)]
    command: PostSubcommand,
}

#[derive(Args, Debug)]
struct PostFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,
    #[arg(long)]
    content_file: Option<PathBuf>,
    #[arg(long)]
    summary: Option<String>,
    #[arg(long)]
    category_id: Option<String>,
    #[arg(long = "tag-id")]
    tag_ids: Vec<String>,
    #[arg(long)]
    publish: Option<bool>,
    #[arg(long)]
    featured: Option<bool>,
}

#[derive(Subcommand, Debug)]
enum PostSubcommand {
    Show { slug: String },
    New(PostFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: PostFields,
    },
    Delete { id: String },
    Like { id: String },
}

#[derive(Args, Debug)]
struct CommentCommand {
    #[command(subcommand)]
    command: CommentSubcommand,
}

#[derive(Subcommand, Debug)]
enum CommentSubcommand {
    Add {
        post_id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        parent_id: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        content: String,
    },
    Delete { id: String },
    Like { id: String },
    Approve { id: String },
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Prints redirects the way a browser would follow them. A redirect to the
/// route already shown is not printed again.
#[derive(Debug, Default)]
struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    /// Record `route` as current; false when it already was.
    fn enter(&self, route: &Route) -> bool {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref() == Some(route) {
            return false;
        }
        *current = Some(route.clone());
        true
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        if self.enter(&route) {
            tracing::debug!(route = %route, "navigate");
            eprintln!("-> {route}");
        }
    }
}

struct CliContext {
    session: SessionStore,
    redirect: UnauthorizedRedirect<TerminalNavigator>,
    json: bool,
}

impl CliContext {
    fn api(&self) -> &Api {
        self.session.api()
    }

    fn navigate(&self, route: Route) {
        self.redirect.navigator().navigate(route);
    }

    /// Current user, or a redirect to the login view.
    fn require_user(&self) -> Result<User, CliError> {
        match self.session.snapshot().user() {
            Some(user) => Ok(user.clone()),
            None => {
                self.navigate(Route::Login);
                Err(CliError::NotLoggedIn)
            }
        }
    }

    fn show<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<(), CliError> {
        if self.json {
            print_json(&serde_json::to_value(value)?)
        } else {
            println!("{}", text());
            Ok(())
        }
    }
}

fn build_context(cli: &Cli) -> Result<CliContext, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.base_url = ClientConfig::new(url)?.base_url;
    }
    if let Some(path) = &cli.storage_path {
        config = config.with_storage_path(path);
    }
    if let Some(secs) = cli.connect_timeout_secs {
        config.connect_timeout = Some(Duration::from_secs(secs));
    }

    let credentials: std::sync::Arc<dyn CredentialStore> =
        std::sync::Arc::new(FileCredentialStore::new(&config.storage_path));
    let api = Api::from_config(&config, credentials.clone()).map_err(CliError::Setup)?;
    Ok(CliContext {
        session: SessionStore::new(api, credentials),
        redirect: UnauthorizedRedirect::new(TerminalNavigator::default()),
        json: cli.json,
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = build_context(&cli)?;
    if let Err(e) = ctx.redirect.guard(ctx.session.hydrate()).await {
        eprintln!("{e}");
    }

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Register(args) => run_register(&ctx, args).await,
        Command::Logout => {
            ctx.session.logout();
            println!("Logged out.");
            ctx.navigate(Route::Home);
            Ok(())
        }
        Command::Whoami => match ctx.session.snapshot().user() {
            Some(user) => ctx.show(user, || views::user(user)),
            None => {
                println!("Not logged in.");
                Ok(())
            }
        },
        Command::Profile(args) => run_profile(&ctx, args).await,
        Command::Password(password) => run_password(&ctx, password).await,
        Command::VerifyEmail { token } => {
            let ack = ctx
                .redirect
                .guard(ctx.api().auth().verify_email(&token))
                .await
                .map_err(|e| CliError::api(&e, "Email verification failed. Please try again."))?;
            ctx.show(&ack, || ack.message.clone())
        }
        Command::Home { category_id, tag_id, search, limit } => {
            let query = PostQuery { limit: Some(limit), category_id, tag_id, search, ..PostQuery::default() };
            run_home(&ctx, &query).await
        }
        Command::Dashboard => run_dashboard(&ctx).await,
        Command::Post(post) => run_post(&ctx, post).await,
        Command::Comment(comment) => run_comment(&ctx, comment).await,
        Command::Categories { nested } => run_categories(&ctx, nested).await,
        Command::Tags { limit } => {
            let page = Page { skip: None, limit };
            let tags = ctx
                .redirect
                .guard(ctx.api().tags().list(page))
                .await
                .map_err(|e| CliError::api(&e, "Failed to load tags. Please try again later."))?;
            ctx.show(&tags, || views::tags(&tags))
        }
    }
}

// =============================================================================
// ACCOUNT VIEWS
// =============================================================================

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    if ctx.session.snapshot().is_authenticated() {
        ctx.navigate(Route::Dashboard);
        return Ok(());
    }
    let user = ctx.redirect.guard(ctx.session.login(email, password)).await?;
    println!("Logged in as {}.", user.display_name());
    ctx.navigate(Route::Dashboard);
    Ok(())
}

async fn run_register(ctx: &CliContext, args: RegisterArgs) -> Result<(), CliError> {
    if ctx.session.snapshot().is_authenticated() {
        ctx.navigate(Route::Dashboard);
        return Ok(());
    }
    let form = RegistrationForm {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        full_name: args.full_name,
    };
    let new_user = form.validate().map_err(CliError::Invalid)?;
    ctx.redirect.guard(ctx.session.register(&new_user)).await?;
    println!("Registration successful! Please check your email to verify your account.");
    ctx.navigate(Route::Login);
    Ok(())
}

async fn run_profile(ctx: &CliContext, args: ProfileArgs) -> Result<(), CliError> {
    ctx.require_user()?;
    let update = UserUpdate {
        email: args.email,
        username: args.username,
        full_name: args.full_name,
        bio: args.bio,
        avatar_url: args.avatar_url,
        is_active: None,
    };
    let user = ctx.redirect.guard(ctx.session.update_profile(&update)).await?;
    ctx.show(&user, || views::user(&user))
}

async fn run_password(ctx: &CliContext, password: PasswordCommand) -> Result<(), CliError> {
    let auth = ctx.api().auth();
    let ack = match password.command {
        PasswordSubcommand::Forgot { email } => ctx
            .redirect
            .guard(auth.forgot_password(&email))
            .await
            .map_err(|e| CliError::api(&e, "Failed to send reset email. Please try again."))?,
        PasswordSubcommand::Reset { token, password } => ctx
            .redirect
            .guard(auth.reset_password(&token, &password))
            .await
            .map_err(|e| CliError::api(&e, "Password reset failed. Please try again."))?,
        PasswordSubcommand::Change { current, new } => {
            ctx.require_user()?;
            ctx.redirect
                .guard(auth.change_password(&current, &new))
                .await
                .map_err(|e| CliError::api(&e, "Password change failed. Please try again."))?
        }
    };
    ctx.show(&ack, || ack.message.clone())
}

// =============================================================================
// CONTENT VIEWS
// =============================================================================

async fn run_home(ctx: &CliContext, query: &PostQuery) -> Result<(), CliError> {
    let api = ctx.api();
    let (posts, categories, tags) = ctx
        .redirect
        .guard(async {
            let (posts_api, categories_api, tags_api) = (api.posts(), api.categories(), api.tags());
            tokio::try_join!(
                posts_api.list(query),
                categories_api.list(Page::default()),
                tags_api.list(Page::limit(10)),
            )
        })
        .await
        .map_err(|e| CliError::api(&e, "Failed to load content. Please try again later."))?;

    ctx.show(&serde_json::json!({ "posts": posts, "categories": categories, "tags": tags }), || {
        views::home(&posts, &categories, &tags)
    })
}

async fn run_dashboard(ctx: &CliContext) -> Result<(), CliError> {
    let user = ctx.require_user()?;
    let query = PostQuery { author_id: Some(user.id.clone()), published_only: Some(false), ..PostQuery::default() };
    let posts = ctx
        .redirect
        .guard(ctx.api().posts().list(&query))
        .await
        .map_err(|e| CliError::api(&e, "Failed to load your posts. Please try again later."))?;
    ctx.show(&posts, || views::dashboard(&user, &posts))
}

async fn run_post(ctx: &CliContext, post: PostCommand) -> Result<(), CliError> {
    let api = ctx.api();
    match post.command {
        PostSubcommand::Show { slug } => {
            let post = match ctx.redirect.guard(api.posts().by_slug(&slug)).await {
                Ok(post) => post,
                Err(e) if e.is_not_found() => return Err(CliError::NotFound(views::not_found("Post"))),
                Err(e) => return Err(CliError::api(&e, "Failed to load post. Please try again later.")),
            };
            let comments = ctx
                .redirect
                .guard(api.comments().for_post(&post.id, Page::default()))
                .await
                .map_err(|e| CliError::api(&e, "Failed to load post. Please try again later."))?;
            ctx.show(&serde_json::json!({ "post": post, "comments": comments }), || {
                views::post_detail(&post, &comments)
            })
        }
        PostSubcommand::New(fields) => {
            ctx.require_user()?;
            let title = fields.title.clone().unwrap_or_default();
            let content = read_content(&fields)?.unwrap_or_default();
            forms::require_post_fields(&title, &content).map_err(CliError::Invalid)?;
            let new_post = NewPost {
                title,
                content,
                summary: fields.summary,
                category_id: fields.category_id,
                tag_ids: fields.tag_ids,
                is_published: fields.publish.unwrap_or(false),
                is_featured: fields.featured.unwrap_or(false),
                ..NewPost::default()
            };
            let created = ctx
                .redirect
                .guard(api.posts().create(&new_post))
                .await
                .map_err(|e| CliError::api(&e, "Failed to create post. Please try again."))?;
            ctx.show(&created, || format!("Created {} [{}].", created.title, created.slug))?;
            ctx.navigate(Route::Dashboard);
            Ok(())
        }
        PostSubcommand::Edit { id, fields } => {
            ctx.require_user()?;
            let existing = match ctx.redirect.guard(api.posts().by_id(&id)).await {
                Ok(post) => post,
                Err(e) if e.is_not_found() => return Err(CliError::NotFound(views::not_found("Post"))),
                Err(e) => return Err(CliError::api(&e, "Failed to load post data. Please try again later.")),
            };
            let content = read_content(&fields)?;
            forms::require_post_fields(
                fields.title.as_deref().unwrap_or(&existing.title),
                content.as_deref().unwrap_or(&existing.content),
            )
            .map_err(CliError::Invalid)?;
            let update = PostUpdate {
                title: fields.title,
                content,
                summary: fields.summary,
                category_id: fields.category_id,
                tag_ids: (!fields.tag_ids.is_empty()).then_some(fields.tag_ids),
                is_published: fields.publish,
                is_featured: fields.featured,
                ..PostUpdate::default()
            };
            let updated = ctx
                .redirect
                .guard(api.posts().update(&id, &update))
                .await
                .map_err(|e| CliError::api(&e, "Failed to update post. Please try again."))?;
            ctx.show(&updated, || format!("Updated {} [{}].", updated.title, updated.slug))?;
            ctx.navigate(Route::Dashboard);
            Ok(())
        }
        PostSubcommand::Delete { id } => {
            ctx.require_user()?;
            ctx.redirect
                .guard(api.posts().delete(&id))
                .await
                .map_err(|e| CliError::api(&e, "Failed to delete post. Please try again."))?;
            println!("Post deleted.");
            ctx.navigate(Route::Dashboard);
            Ok(())
        }
        PostSubcommand::Like { id } => {
            let liked = ctx
                .redirect
                .guard(api.posts().like(&id))
                .await
                .map_err(|e| CliError::api(&e, "Failed to like post. Please try again."))?;
            ctx.show(&liked, || format!("{} now has {} likes.", liked.title, liked.like_count))
        }
    }
}

async fn run_comment(ctx: &CliContext, comment: CommentCommand) -> Result<(), CliError> {
    let comments = ctx.api().comments();
    let default_message = "Failed to submit comment. Please try again.";
    let result = match comment.command {
        CommentSubcommand::Add { post_id, content, parent_id } => {
            ctx.require_user()?;
            if content.trim().is_empty() {
                return Err(CliError::Invalid("Comment cannot be empty.".to_owned()));
            }
            let new_comment = NewComment { content, post_id, parent_id };
            ctx.redirect.guard(comments.create(&new_comment)).await
        }
        CommentSubcommand::Edit { id, content } => {
            ctx.require_user()?;
            let update = CommentUpdate { content: Some(content), is_approved: None };
            ctx.redirect.guard(comments.update(&id, &update)).await
        }
        CommentSubcommand::Delete { id } => {
            ctx.require_user()?;
            ctx.redirect
                .guard(comments.delete(&id))
                .await
                .map_err(|e| CliError::api(&e, "Failed to delete comment. Please try again."))?;
            println!("Comment deleted.");
            return Ok(());
        }
        CommentSubcommand::Like { id } => ctx.redirect.guard(comments.like(&id)).await,
        CommentSubcommand::Approve { id } => {
            ctx.require_user()?;
            ctx.redirect.guard(comments.approve(&id)).await
        }
    };
    let saved = result.map_err(|e| CliError::api(&e, default_message))?;
    ctx.show(&saved, || {
        format!("Comment {} ({} likes{}).", saved.id, saved.like_count, if saved.is_approved { "" } else { ", pending approval" })
    })
}

async fn run_categories(ctx: &CliContext, nested: bool) -> Result<(), CliError> {
    let api = ctx.api();
    let default_message = "Failed to load categories. Please try again later.";
    if nested {
        let tree = ctx
            .redirect
            .guard(api.categories().nested())
            .await
            .map_err(|e| CliError::api(&e, default_message))?;
        ctx.show(&tree, || views::category_tree(&tree))
    } else {
        let list = ctx
            .redirect
            .guard(api.categories().list(Page::default()))
            .await
            .map_err(|e| CliError::api(&e, default_message))?;
        ctx.show(&list, || views::categories(&list))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_content(fields: &PostFields) -> Result<Option<String>, CliError> {
    match (&fields.content, &fields.content_file) {
        (Some(content), _) => Ok(Some(content.clone())),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| CliError::Read { path: path.clone(), source }),
        (None, None) => Ok(None),
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{pretty}");
    Ok(())
}
