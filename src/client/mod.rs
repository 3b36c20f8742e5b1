//! Consumer side of the API: session-scoped token storage, the HTTP client
//! and the page flows built on them.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod shell;
pub mod storage;
