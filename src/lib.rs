//! # quill
//!
//! Client-side core of the Quill blogging platform: a typed REST client for
//! the blog backend plus the authentication session that sits on top of it.
//!
//! This crate contains configuration, wire types, the HTTP adapter, one
//! facade per backend resource, durable credential storage, the session
//! store, and the router-aware wrapper that reacts to expired sessions.
//! The `quill-cli` crate renders views on top of it.

pub mod api;
pub mod config;
pub mod navigation;
pub mod net;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::Api;
pub use config::ClientConfig;
pub use net::error::{ApiError, ErrorPayload};
pub use net::http::HttpClient;
pub use state::credential::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use state::session::{Session, SessionError, SessionState, SessionStore};
