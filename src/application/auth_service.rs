use crate::application::validation::{validate_email, validate_password};
use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{Credentials, PublicUser, Session, User};
use crate::infrastructure::security::{
    TokenError, generate_token, hash_password, validate_token, verify_password,
};
use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl: Duration) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl,
        }
    }

    fn require_credentials(creds: &Credentials) -> Result<Credentials> {
        let creds = creds.trimmed();
        if creds.email.is_empty() || creds.password.is_empty() {
            return Err(
                DomainError::Validation("Email and password are required".to_string()).into(),
            );
        }
        Ok(creds)
    }

    fn issue_token(&self, user_id: &str) -> Result<String> {
        generate_token(user_id, &self.jwt_secret, self.token_ttl).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e)).into()
        })
    }

    #[instrument(skip(self, req), fields(email = %req.email.trim()))]
    pub async fn register_user(&self, req: Credentials) -> Result<Session> {
        trace!("Starting user registration");
        let creds = Self::require_credentials(&req)?;

        if !validate_email(&creds.email) {
            return Err(DomainError::Validation("Invalid email format".to_string()).into());
        }
        validate_password(&creds.password)
            .map_err(|msg| DomainError::Validation(msg.to_string()))?;

        let password_hash = hash_password(&creds.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: creds.email,
            password_hash,
        };

        debug!(user_id = %user.id, "Saving user to repository");
        if !self.user_repository.insert_if_absent(user.clone()).await? {
            warn!(email = %user.email, "User already exists");
            return Err(DomainError::Conflict("User already exists".to_string()).into());
        }

        let token = self.issue_token(&user.id)?;
        info!(user_id = %user.id, email = %user.email, "User registered successfully");

        Ok(Session {
            token,
            user: PublicUser::from(&user),
        })
    }

    #[instrument(skip(self, req), fields(email = %req.email.trim()))]
    pub async fn login(&self, req: Credentials) -> Result<Session> {
        trace!("Starting login");
        let creds = Self::require_credentials(&req)?;

        let user = self
            .user_repository
            .find_user_by_email(&creds.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %creds.email, "User not found during login");
                DomainError::Unauthorized("Invalid email or password".to_string())
            })?;

        let is_valid = verify_password(&creds.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized("Invalid email or password".to_string()).into());
        }

        let token = self.issue_token(&user.id)?;
        info!(user_id = %user.id, email = %user.email, "Login successful");

        Ok(Session {
            token,
            user: PublicUser::from(&user),
        })
    }

    /// Resolves a bearer token to the user it was issued for.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> Result<PublicUser> {
        let user_id = validate_token(token, &self.jwt_secret).map_err(|e| match e {
            TokenError::Expired => {
                debug!("Rejected expired token");
                DomainError::TokenExpired
            }
            TokenError::Invalid(reason) => {
                debug!(reason = %reason, "Rejected invalid token");
                DomainError::TokenInvalid
            }
        })?;

        let user = self
            .user_repository
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token refers to unknown user");
                DomainError::TokenInvalid
            })?;

        Ok(PublicUser::from(&user))
    }
}
