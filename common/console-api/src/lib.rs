//! Shared API, exported to `console-workspace`, `console-backend`, and `console-session`
//!
//! The backend entity shapes, the page routing scheme, and the on-disk configuration are described in this crate.

pub mod config;
pub mod env;
pub mod log;
pub mod namespace;
pub mod resource;
pub mod route;
