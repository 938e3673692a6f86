pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod notes;
pub mod projects;
pub mod search;
pub mod user;
