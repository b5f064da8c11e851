// ============================
// ticklist-backend-lib/src/storage.rs
// ============================
//! Storage abstraction with an in-process implementation.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::AppError;

/// A registered account
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Password digest, never the plaintext
    pub password: String,
    pub email: String,
    pub theme: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A todo category. `name` is unique within its owning user only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A todo item. Always references a category of the same user.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: i32,
    pub category_id: String,
    pub user_id: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trait for storage backends.
///
/// An explicit handle is injected into [`crate::AppState`] at
/// construction; nothing in the services reaches for a global.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<(), AppError>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Read the stored password digest for a user
    async fn password_by_user_id(&self, user_id: &str) -> Result<String, AppError>;

    async fn update_password(&self, user_id: &str, digest: &str) -> Result<(), AppError>;

    async fn update_theme(&self, user_id: &str, theme: i32) -> Result<(), AppError>;

    /// Count a user's todos with the given status
    async fn count_todos(&self, user_id: &str, status: i32) -> Result<i64, AppError>;

    async fn create_category(&self, category: Category) -> Result<(), AppError>;

    async fn rename_category(&self, id: &str, name: &str) -> Result<(), AppError>;

    async fn category_by_id(&self, id: &str) -> Result<Option<Category>, AppError>;

    async fn categories_by_user(&self, user_id: &str) -> Result<Vec<Category>, AppError>;

    /// Delete a category together with every todo referencing it.
    ///
    /// Implementations must apply both removals as one indivisible
    /// operation: concurrent readers never observe the category gone
    /// while its todos remain. A backend that fails after partial
    /// effect must report [`AppError::Cascade`].
    async fn delete_category_cascade(&self, id: &str) -> Result<(), AppError>;

    async fn create_todo(&self, todo: Todo) -> Result<(), AppError>;

    async fn todo_by_id(&self, id: &str) -> Result<Option<Todo>, AppError>;

    /// Overwrite an existing todo row
    async fn update_todo(&self, todo: Todo) -> Result<(), AppError>;

    /// Delete a todo by id; `TodoNotFound` when no row matched
    async fn delete_todo(&self, id: &str) -> Result<(), AppError>;

    async fn todos_by_user(&self, user_id: &str) -> Result<Vec<Todo>, AppError>;

    /// Resolve display names for a set of category ids in one call.
    /// Every requested id must resolve; a missing id is an error.
    async fn category_names(&self, ids: &[String]) -> Result<HashMap<String, String>, AppError>;
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    categories: HashMap<String, Category>,
    todos: HashMap<String, Todo>,
}

/// In-process implementation of the [`Storage`] trait.
///
/// A single `RwLock` over all three tables gives the cascade delete its
/// transactional boundary for free: the write guard covers both
/// removals.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, user: User) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn password_by_user_id(&self, user_id: &str) -> Result<String, AppError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(user_id)
            .map(|u| u.password.clone())
            .ok_or(AppError::UserNotFound)
    }

    async fn update_password(&self, user_id: &str, digest: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(user_id).ok_or(AppError::UserNotFound)?;
        user.password = digest.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_theme(&self, user_id: &str, theme: i32) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(user_id).ok_or(AppError::UserNotFound)?;
        user.theme = theme;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn count_todos(&self, user_id: &str, status: i32) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .todos
            .values()
            .filter(|t| t.user_id == user_id && t.status == status)
            .count() as i64)
    }

    async fn create_category(&self, category: Category) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.categories.insert(category.id.clone(), category);
        Ok(())
    }

    async fn rename_category(&self, id: &str, name: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let category = inner
            .categories
            .get_mut(id)
            .ok_or(AppError::CategoryNotFound)?;
        category.name = name.to_string();
        category.updated_at = Utc::now();
        Ok(())
    }

    async fn category_by_id(&self, id: &str) -> Result<Option<Category>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.categories.get(id).cloned())
    }

    async fn categories_by_user(&self, user_id: &str) -> Result<Vec<Category>, AppError> {
        let inner = self.inner.read().await;
        let mut categories: Vec<Category> = inner
            .categories
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(categories)
    }

    async fn delete_category_cascade(&self, id: &str) -> Result<(), AppError> {
        // Both removals happen under the same write guard.
        let mut inner = self.inner.write().await;
        inner.categories.remove(id);
        inner.todos.retain(|_, t| t.category_id != id);
        Ok(())
    }

    async fn create_todo(&self, todo: Todo) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.todos.insert(todo.id.clone(), todo);
        Ok(())
    }

    async fn todo_by_id(&self, id: &str) -> Result<Option<Todo>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.get(id).cloned())
    }

    async fn update_todo(&self, todo: Todo) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if !inner.todos.contains_key(&todo.id) {
            return Err(AppError::TodoNotFound);
        }
        inner.todos.insert(todo.id.clone(), todo);
        Ok(())
    }

    async fn delete_todo(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner.todos.remove(id).is_none() {
            return Err(AppError::TodoNotFound);
        }
        Ok(())
    }

    async fn todos_by_user(&self, user_id: &str) -> Result<Vec<Todo>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .todos
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn category_names(&self, ids: &[String]) -> Result<HashMap<String, String>, AppError> {
        let inner = self.inner.read().await;
        let mut names = HashMap::with_capacity(ids.len());
        for id in ids {
            let category = inner.categories.get(id).ok_or(AppError::CategoryNotFound)?;
            names.insert(id.clone(), category.name.clone());
        }
        Ok(names)
    }
}
