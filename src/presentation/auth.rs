use crate::domain::user::{Credentials, PublicUser};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Returned by signup and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub msg: String,
}

/// Reads signup/login credentials from a JSON body.
///
/// `null`, an empty object, or anything that is not an object with string
/// fields counts as no input at all.
pub fn credentials_from(body: Value) -> Result<Credentials, ApiError> {
    let no_input = || ApiError::BadRequest("No input data provided".to_string());
    match &body {
        Value::Object(fields) if !fields.is_empty() => {}
        _ => return Err(no_input()),
    }
    serde_json::from_value(body).map_err(|e| {
        warn!(error = %e, "Credentials body has the wrong shape");
        no_input()
    })
}

#[instrument(skip(state, req))]
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let creds = credentials_from(req.into_inner())?;
    info!(email = %creds.email.trim(), "Registration request received");

    let session = state
        .auth_service
        .register_user(creds)
        .await
        .map_err(|e| ApiError::from(e).masked("Registration failed"))?;

    Ok(HttpResponse::Created().json(SessionResponse {
        success: true,
        token: session.token,
        user: session.user,
        msg: "User created successfully".to_string(),
    }))
}

#[instrument(skip(state, req))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let creds = credentials_from(req.into_inner())?;
    info!(email = %creds.email.trim(), "Login request received");

    let session = state
        .auth_service
        .login(creds)
        .await
        .map_err(|e| ApiError::from(e).masked("Login failed"))?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        success: true,
        token: session.token,
        user: session.user,
        msg: "Login successful".to_string(),
    }))
}

/// Tokens are stateless; the client is expected to discard its copy.
#[instrument(skip(user), fields(user_id = %user.0.id))]
pub async fn logout(user: AuthenticatedUser) -> HttpResponse {
    info!("Logout requested");
    HttpResponse::Ok().json(LogoutResponse {
        success: true,
        msg: "Logout successful (please remove token on client side)".to_string(),
    })
}
