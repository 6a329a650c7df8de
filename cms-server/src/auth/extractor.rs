//! JWT Extractor
//!
//! Custom extractor for automatically validating JWT tokens

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{Claims, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// The authenticated dashboard principal for the current request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub email: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub, email: claims.email }
    }
}

/// Use this extractor in protected handlers to validate JWT and extract the
/// current admin. Requests that went through [`require_auth`] reuse the
/// extension set by the middleware.
///
/// [`require_auth`]: crate::auth::middleware::require_auth
impl FromRequestParts<ServerState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(admin.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => {
                JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
            }
            None => return Err(AppError::Unauthorized),
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let admin = CurrentAdmin::from(claims);
                parts.extensions.insert(admin.clone());
                Ok(admin)
            }
            Err(crate::auth::JwtError::ExpiredToken) => Err(AppError::TokenExpired),
            Err(_) => Err(AppError::InvalidToken),
        }
    }
}
