// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const USER_LOGIN: &str = "user.login";
pub const AUTH_REJECTED: &str = "auth.rejected";
pub const CATEGORY_CREATED: &str = "category.created";
pub const CATEGORY_DELETED: &str = "category.deleted";
pub const TODO_CREATED: &str = "todo.created";
pub const TODO_UPDATED: &str = "todo.updated";
pub const TODO_DELETED: &str = "todo.deleted";
pub const TODO_PAGED: &str = "todo.paged";
