// ================
// common/src/lib.rs
// ================
//! Wire types shared between the ticklist server and its clients.
//! This module defines the response envelope, request DTOs and the
//! view objects returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Todo status codes. A todo is created as `Pending` and flips to
/// `Completed`; `0` is never stored and means "no filter" in queries.
pub const TODO_STATUS_PENDING: i32 = 1;
pub const TODO_STATUS_COMPLETED: i32 = 2;

/// Wire format for due dates (`dueDate` fields).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Wire format for `startDate`/`endDate` query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Uniform response envelope applied to every endpoint.
///
/// `code = 1` signals success and `code = 0` signals failure. This is
/// inverted relative to the usual boolean convention and is kept exactly
/// for client compatibility.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    pub code: i32,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success envelope with the default message.
    pub fn ok(data: T) -> Self {
        Self::ok_with(data, "operation successful")
    }

    /// Success envelope with a custom message.
    pub fn ok_with(data: T, msg: impl Into<String>) -> Self {
        Envelope {
            code: 1,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Failure envelope. `data` is always null.
    pub fn fail(msg: impl Into<String>) -> Self {
        Envelope {
            code: 0,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Login request body
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request body
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Password change request body
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PwdUpdateRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Category create-or-update request body.
/// An empty `id` means create; a non-empty `id` renames that category.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryUpsert {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Todo create-or-update request body.
///
/// An empty `id` means create. `dueDate` uses [`DATETIME_FORMAT`]; an
/// empty string means "no due date". On update an empty `content`
/// explicitly clears the stored content.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpsert {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: i32,
}

/// Query parameters for the paginated todo listing.
/// Dates use [`DATE_FORMAT`]; empty strings mean "no filter".
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TodoPageQuery {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub page_size: i32,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// View returned by login and register.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub id: String,
    pub username: String,
    pub token: String,
    pub theme: i32,
}

/// Category projection `{id, name}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    pub category_name: String,
}

/// A todo enriched with its category's display name.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: i32,
    pub category_id: String,
    pub category_name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of an ordered result set.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageResult<T> {
    pub total: i64,
    pub size: i32,
    pub current: i32,
    pub records: Vec<T>,
}

/// Done/undone counters for the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusView {
    pub num_of_done: i64,
    pub num_of_undone: i64,
}
