//! quire-core - Core library for Quire
//!
//! This crate owns the authentication session, the request pipeline that
//! decorates every outbound GraphQL call, and the typed project/note/search
//! operations used by the Quire interfaces.

pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod storage;
pub mod transport;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use api::Api;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::{Credentials, SessionManager};
pub use storage::TokenStore;
