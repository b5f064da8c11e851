// ============================
// crates/backend-lib/src/handlers/todo.rs
// ============================
//! Todo endpoints.
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use ticklist_common::{Envelope, TodoPageQuery, TodoUpsert, DATETIME_FORMAT, DATE_FORMAT};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::storage::Storage;
use crate::todo::{self, TodoFilter};
use crate::AppState;

/// GET /api/todo
pub async fn page<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(query): Query<TodoPageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = TodoFilter {
        category_id: query.category_id.clone(),
        status: query.status,
        keyword: query.keyword.clone(),
        start_date: parse_date(&query.start_date)?,
        end_date: parse_date(&query.end_date)?,
    };

    let result = todo::page(
        &state.storage,
        &user_id,
        &filter,
        query.page,
        query.page_size,
    )
    .await?;
    Ok(Json(Envelope::ok(result)))
}

/// POST /api/todo
pub async fn upsert<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(req): Json<TodoUpsert>,
) -> Result<impl IntoResponse, AppError> {
    let due_date = parse_due_date(&req.due_date)?;
    todo::create_or_update(&state.storage, &user_id, due_date, &req).await?;
    Ok(Json(Envelope::ok("todo processed")))
}

/// DELETE /api/todo/{id}
pub async fn remove<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    todo::delete(&state.storage, &user_id, &id).await?;
    Ok(Json(Envelope::ok("todo deleted")))
}

/// An empty string means "no due date"
fn parse_due_date(raw: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map(|dt| Some(dt.and_utc()))
        .map_err(|_| AppError::InvalidParameter)
}

/// An empty string means "no filter"
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::InvalidParameter)
}
