use crate::models::{Role, UserProfile};
use crate::routes::{error::ApiError, AppState};
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Verifies HS256 bearer tokens
#[derive(Clone)]
pub struct AuthConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthConfig {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

/// The caller's profile, resolved from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserProfile);

impl AuthenticatedUser {
    pub fn profile(&self) -> &UserProfile {
        &self.0
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    /// Reject the request unless the user holds one of `roles`
    pub fn require_role(&self, roles: &[Role]) -> Result<(), ApiError> {
        if self.0.has_role(roles) {
            return Ok(());
        }
        let required = roles.iter().map(Role::as_str).collect::<Vec<_>>().join(" or ");
        Err(ApiError::Forbidden(format!(
            "You do not have permission to perform this action. Required role: {}",
            required
        )))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("Application state missing from request");
                ApiError::Unauthorized("Authentication is not configured")
            })?;

            let token = token.ok_or_else(|| {
                tracing::debug!("Missing or malformed Authorization header");
                ApiError::Unauthorized("Please login first")
            })?;

            let claims = state.auth.verify(&token).map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ApiError::Unauthorized("Invalid token")
            })?;

            match state.users.get_profile(claims.id).await? {
                Some(profile) => Ok(AuthenticatedUser(profile)),
                None => {
                    tracing::warn!("Token for unknown user {}", claims.id);
                    Err(ApiError::Unauthorized(
                        "The user associated with this token no longer exists.",
                    ))
                }
            }
        })
    }
}
