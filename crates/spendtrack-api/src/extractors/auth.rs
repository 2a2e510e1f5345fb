//! Bearer token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use spendtrack_core::error::AppError;
use spendtrack_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that authenticates the request from its `Authorization`
/// header and yields a [`RequestContext`].
///
/// The bearer token only proves identity. The user row is re-fetched on
/// every request, so deleted accounts are locked out and role changes
/// take effect immediately instead of at token expiry.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid authorization header format"))?;

        let claims = state.jwt_decoder.decode_token(token)?;

        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| AppError::unauthenticated("User no longer exists"))?;

        Ok(Self(RequestContext::new(user.id, user.email, user.role)))
    }
}
