use crate::application::auth_service::AuthService;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::PublicUser;
use crate::presentation::middleware::{AuthenticatedUser, TokenRejection};
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    /// Exposes development-only routes.
    pub debug: bool,
}

/// Every failure leaves the API as `{"success": false, "msg": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub msg: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Replaces the detail of an internal error with a client-facing message.
    /// The original detail is logged first.
    pub fn masked(self, public_msg: &str) -> Self {
        match self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "Internal error");
                ApiError::Internal(public_msg.to_string())
            }
            other => other,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let msg = self.to_string();

        if status.is_server_error() {
            error!(msg = %msg, status = %status, "Request failed");
        } else {
            warn!(msg = %msg, status = %status, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            msg,
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let msg = err.to_string();
        match err {
            DomainError::Validation(_) => ApiError::BadRequest(msg),
            DomainError::Conflict(_) => ApiError::Conflict(msg),
            DomainError::Unauthorized(_)
            | DomainError::TokenMissing
            | DomainError::TokenExpired
            | DomainError::TokenInvalid => ApiError::Unauthorized(msg),
            DomainError::Internal(_) => ApiError::Internal(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => ApiError::from(domain),
            Err(other) => ApiError::Internal(other.to_string()),
        }
    }
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let extensions = req.extensions();
        let outcome = match extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(user.clone()),
            None => {
                let rejection = extensions
                    .get::<TokenRejection>()
                    .copied()
                    .unwrap_or(TokenRejection::Missing);
                Err(ApiError::from(DomainError::from(rejection)))
            }
        };
        Box::pin(async move { outcome })
    }
}

/// JSON extractor config: any unreadable body is reported as missing input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected request body");
        ApiError::BadRequest("No input data provided".to_string()).into()
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Resource not found".to_string()))
}

// Handlers

#[derive(Debug, Serialize, Deserialize)]
pub struct PrivateResponse {
    pub success: bool,
    pub msg: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: String,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SitemapResponse {
    pub routes: Vec<String>,
}

/// Routes listed by `/sitemap`.
pub const ROUTES: &[&str] = &[
    "POST /api/signup",
    "POST /api/login",
    "POST /api/logout",
    "GET /api/private",
    "GET /api/me",
    "GET /api/status",
    "GET /sitemap",
];

#[instrument(skip(user), fields(user_id = %user.0.id))]
pub async fn private(user: AuthenticatedUser) -> HttpResponse {
    let user = user.0;
    info!("Serving private page");
    HttpResponse::Ok().json(PrivateResponse {
        success: true,
        msg: format!("Welcome {}!", user.email),
        user,
    })
}

#[instrument(skip(user), fields(user_id = %user.0.id))]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        success: true,
        user: user.0,
    })
}

#[instrument]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        success: true,
        status: "API is running".to_string(),
        time: Utc::now().to_rfc3339(),
    })
}

#[instrument(skip(state))]
pub async fn sitemap(state: web::Data<AppState>) -> HttpResponse {
    if !state.debug {
        return HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Not available in production" }));
    }
    HttpResponse::Ok().json(SitemapResponse {
        routes: ROUTES.iter().map(|r| r.to_string()).collect(),
    })
}
