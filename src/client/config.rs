use crate::client::error::ClientError;
use std::env;

/// Variables consulted for the API base URL, highest priority first.
pub const BACKEND_URL_VARS: &[&str] = &[
    "BACKEND_URL",
    "VITE_BACKEND_URL",
    "VITE_API_URL",
    "REACT_APP_API_URL",
];

/// Shown in place of every page when no backend URL is configured.
pub const BACKEND_URL_NOTICE: &str = "\
Missing BACKEND_URL environment variable.

The client needs to know where the API lives. Either:
  1. export BACKEND_URL=http://127.0.0.1:3001
  2. or pass --backend-url http://127.0.0.1:3001

Then start the client again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ClientError> {
        Self::resolve_with(explicit, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let candidate = explicit
            .map(str::to_owned)
            .into_iter()
            .chain(BACKEND_URL_VARS.iter().filter_map(|key| lookup(key)))
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .find(|url| !url.is_empty());

        match candidate {
            Some(base_url) => Ok(Self { base_url }),
            None => Err(ClientError::MissingBackendUrl),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
