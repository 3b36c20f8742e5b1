use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::domain::user::Credentials;
use crate::presentation::auth::{LogoutResponse, SessionResponse};
use crate::presentation::handlers::{PrivateResponse, StatusResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// The calls the pages make against the backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, credentials: &Credentials) -> Result<SessionResponse, ClientError>;
    async fn login(&self, credentials: &Credentials) -> Result<SessionResponse, ClientError>;
    async fn logout(&self, token: &str) -> Result<LogoutResponse, ClientError>;
    async fn private(&self, token: &str) -> Result<PrivateResponse, ClientError>;
    async fn status(&self) -> Result<StatusResponse, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
}

pub struct HttpAuthApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpAuthApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn bearer(token: &str) -> Result<HeaderValue, ClientError> {
        Ok(HeaderValue::from_str(&format!("Bearer {token}"))?)
    }

    /// Decodes a 2xx body as `T`; anything else becomes `ClientError::Api`
    /// carrying the server's `msg` when the body has one.
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let msg = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.msg);
        debug!(status = status.as_u16(), msg = ?msg, "API returned an error");
        Err(ClientError::Api {
            status: status.as_u16(),
            msg,
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn signup(&self, credentials: &Credentials) -> Result<SessionResponse, ClientError> {
        let response = self
            .http
            .post(self.config.endpoint("/api/signup"))
            .json(credentials)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<SessionResponse, ClientError> {
        let response = self
            .http
            .post(self.config.endpoint("/api/login"))
            .json(credentials)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, token))]
    async fn logout(&self, token: &str) -> Result<LogoutResponse, ClientError> {
        let response = self
            .http
            .post(self.config.endpoint("/api/logout"))
            .header(AUTHORIZATION, Self::bearer(token)?)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, token))]
    async fn private(&self, token: &str) -> Result<PrivateResponse, ClientError> {
        let response = self
            .http
            .get(self.config.endpoint("/api/private"))
            .header(AUTHORIZATION, Self::bearer(token)?)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self))]
    async fn status(&self) -> Result<StatusResponse, ClientError> {
        let response = self
            .http
            .get(self.config.endpoint("/api/status"))
            .send()
            .await?;
        Self::read(response).await
    }
}
