//! Networking layer for the blog backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the single adapter every request goes through, `error` and
//! `normalize` turn failed responses into typed errors and display strings,
//! and `types` defines the wire schema shared by the facades in `crate::api`.

pub mod error;
pub mod http;
pub mod normalize;
pub mod types;
