// ============================
// crates/backend-lib/src/handlers/category.rs
// ============================
//! Category endpoints.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use ticklist_common::{CategoryUpsert, Envelope};

use crate::auth::CurrentUser;
use crate::category;
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// GET /api/category
pub async fn list<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let categories = category::list(&state.storage, &user_id).await?;
    Ok(Json(Envelope::ok_with(categories, "category list fetched")))
}

/// POST /api/category
pub async fn upsert<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(req): Json<CategoryUpsert>,
) -> Result<impl IntoResponse, AppError> {
    category::create_or_update(&state.storage, &user_id, &req).await?;
    Ok(Json(Envelope::ok("category processed")))
}

/// DELETE /api/category/{id}
pub async fn remove<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    category::delete(&state.storage, &user_id, &id).await?;
    Ok(Json(Envelope::ok("category processed")))
}
