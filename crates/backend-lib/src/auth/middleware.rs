// ============================
// ticklist-backend-lib/src/auth/middleware.rs
// ============================
//! Bearer-token access gate.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// Identity resolved by the access gate, attached to the request for
/// downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// The single authorization choke point.
///
/// Extracts the bearer token, verifies it and attaches the resolved
/// user id to the request. On any failure the pipeline halts here — no
/// handler runs. Services below this layer only scope by the resolved
/// user id; none of them re-authenticate.
pub async fn require_auth<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::TokenMissing)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::TokenInvalid)?;

    let claims = state.tokens.verify(token)?;

    request.extensions_mut().insert(CurrentUser(claims.user_id));
    Ok(next.run(request).await)
}
