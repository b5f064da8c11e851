// ============================
// crates/backend-lib/src/handlers/user.rs
// ============================
//! Account endpoints.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use ticklist_common::{Envelope, LoginRequest, PwdUpdateRequest, RegisterRequest};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::storage::Storage;
use crate::user;
use crate::AppState;

/// POST /api/user/login
pub async fn login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = user::login(&state.storage, &state.tokens, &req).await?;
    Ok(Json(Envelope::ok_with(view, "login successful")))
}

/// POST /api/user/register
pub async fn register<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = user::register(&state.storage, &state.tokens, &req).await?;
    Ok(Json(Envelope::ok_with(view, "registration successful")))
}

/// PUT /api/user/pwd
pub async fn update_password<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(req): Json<PwdUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    user::change_password(&state.storage, &user_id, &req).await?;
    Ok(Json(Envelope::ok("password updated")))
}

/// PUT /api/user/theme/{theme}
pub async fn update_theme<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(theme): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    user::set_theme(&state.storage, &user_id, theme).await?;
    Ok(Json(Envelope::ok("theme updated")))
}

/// GET /api/user/status
pub async fn status<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = user::status(&state.storage, &user_id).await?;
    Ok(Json(Envelope::ok_with(view, "user status fetched")))
}
