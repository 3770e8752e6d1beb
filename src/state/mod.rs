//! Client-side state: the durable credential and the authentication session
//! built on top of it.

pub mod credential;
pub mod session;
