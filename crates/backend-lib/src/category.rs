// ============================
// ticklist-backend-lib/src/category.rs
// ============================
//! Category service: per-user name uniqueness and cascading deletion.
use chrono::Utc;
use metrics::counter;
use ticklist_common::{CategoryUpsert, CategoryView};
use uuid::Uuid;

use crate::error::AppError;
use crate::metrics::{CATEGORY_CREATED, CATEGORY_DELETED};
use crate::storage::{Category, Storage};

/// Create a category, or rename one when `req.id` is set.
///
/// The name must be unique among the caller's categories; the row being
/// updated may keep its own name. Uniqueness is case-sensitive and
/// scoped to the owner, not global.
pub async fn create_or_update<S: Storage>(
    storage: &S,
    user_id: &str,
    req: &CategoryUpsert,
) -> Result<(), AppError> {
    if req.name.is_empty() {
        return Err(AppError::CategoryNameRequired);
    }

    let existing = storage.categories_by_user(user_id).await?;
    if existing
        .iter()
        .any(|c| c.name == req.name && c.id != req.id)
    {
        return Err(AppError::CategoryNameExists);
    }

    if req.id.is_empty() {
        let now = Utc::now();
        storage
            .create_category(Category {
                id: Uuid::new_v4().to_string(),
                name: req.name.clone(),
                user_id: user_id.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;
        counter!(CATEGORY_CREATED).increment(1);
    } else {
        let target = storage
            .category_by_id(&req.id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        if target.user_id != user_id {
            return Err(AppError::NotOwner);
        }
        storage.rename_category(&req.id, &req.name).await?;
    }

    Ok(())
}

/// Delete a category and every todo referencing it.
///
/// The storage backend applies both removals as one operation, so no
/// orphaned todo is ever observable.
pub async fn delete<S: Storage>(storage: &S, user_id: &str, id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::CategoryIdRequired);
    }

    let target = storage
        .category_by_id(id)
        .await?
        .ok_or(AppError::CategoryNotFound)?;
    if target.user_id != user_id {
        return Err(AppError::NotOwner);
    }

    storage.delete_category_cascade(id).await?;
    counter!(CATEGORY_DELETED).increment(1);
    Ok(())
}

/// All categories owned by the caller, projected to `{id, name}`.
pub async fn list<S: Storage>(storage: &S, user_id: &str) -> Result<Vec<CategoryView>, AppError> {
    let categories = storage.categories_by_user(user_id).await?;
    Ok(categories
        .into_iter()
        .map(|c| CategoryView {
            id: c.id,
            category_name: c.name,
        })
        .collect())
}
