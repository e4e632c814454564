use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use stackly_core::UserAccount;

use crate::{errors::HttpError, state::HttpState};

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's session or reject with 401 before touching any
/// other storage.
pub fn require_user(state: &HttpState, headers: &HeaderMap) -> Result<UserAccount, HttpError> {
    let token = bearer_token(headers).ok_or_else(unauthorized)?;
    state
        .app
        .services
        .accounts
        .authenticate(token)
        .map_err(HttpError::from)?
        .ok_or_else(unauthorized)
}

/// Resolve the caller's session when one is supplied; anonymous callers and
/// lookup failures both come back as None.
pub fn optional_user(state: &HttpState, headers: &HeaderMap) -> Option<UserAccount> {
    let token = bearer_token(headers)?;
    match state.app.services.accounts.authenticate(token) {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, "session lookup failed");
            None
        }
    }
}

pub fn unauthorized() -> HttpError {
    HttpError::new(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        Some("unauthorized".to_string()),
    )
}
