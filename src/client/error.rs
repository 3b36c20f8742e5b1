use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("backend URL is not configured; set BACKEND_URL or pass --backend-url")]
    MissingBackendUrl,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server responded {status}: {}", .msg.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, msg: Option<String> },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Server-provided message, or `fallback` when the server gave none.
    ///
    /// Transport errors report their own description.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { msg: Some(msg), .. } => msg.clone(),
            ClientError::Api { msg: None, .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
