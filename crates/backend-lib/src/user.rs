// ============================
// ticklist-backend-lib/src/user.rs
// ============================
//! Account operations: registration, login, password and theme
//! updates, done/undone counters.
use chrono::Utc;
use metrics::counter;
use ticklist_common::{
    LoginRequest, LoginView, PwdUpdateRequest, RegisterRequest, UserStatusView,
    TODO_STATUS_COMPLETED, TODO_STATUS_PENDING,
};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, TokenService};
use crate::error::AppError;
use crate::metrics::{AUTH_REJECTED, USER_LOGIN, USER_REGISTERED};
use crate::storage::{Storage, User};

/// Create an account and issue its first session token.
pub async fn register<S: Storage>(
    storage: &S,
    tokens: &TokenService,
    req: &RegisterRequest,
) -> Result<LoginView, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::CredentialsRequired);
    }

    if storage.user_by_username(&req.username).await?.is_some() {
        return Err(AppError::UserExists);
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: req.username.clone(),
        password: hash_password(&req.password),
        email: String::new(),
        theme: 0,
        created_at: now,
        updated_at: now,
    };
    storage.create_user(user.clone()).await?;

    let token = tokens.issue(&user)?;
    counter!(USER_REGISTERED).increment(1);

    Ok(LoginView {
        id: user.id,
        username: user.username,
        token,
        theme: user.theme,
    })
}

/// Verify credentials and issue a session token.
pub async fn login<S: Storage>(
    storage: &S,
    tokens: &TokenService,
    req: &LoginRequest,
) -> Result<LoginView, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::CredentialsRequired);
    }

    let user = storage
        .user_by_username(&req.username)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !verify_password(&user.password, &req.password) {
        counter!(AUTH_REJECTED).increment(1);
        return Err(AppError::PasswordMismatch);
    }

    let token = tokens.issue(&user)?;
    counter!(USER_LOGIN).increment(1);

    Ok(LoginView {
        id: user.id,
        username: user.username,
        token,
        theme: user.theme,
    })
}

/// Change the caller's password. The old password must verify against
/// the stored digest first.
pub async fn change_password<S: Storage>(
    storage: &S,
    user_id: &str,
    req: &PwdUpdateRequest,
) -> Result<(), AppError> {
    if req.old_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::PasswordRequired);
    }

    let stored = storage.password_by_user_id(user_id).await?;
    if !verify_password(&stored, &req.old_password) {
        return Err(AppError::PasswordMismatch);
    }

    storage
        .update_password(user_id, &hash_password(&req.new_password))
        .await
}

/// Set the caller's theme preference. `0` is the unset sentinel and is
/// rejected.
pub async fn set_theme<S: Storage>(storage: &S, user_id: &str, theme: i32) -> Result<(), AppError> {
    if theme == 0 {
        return Err(AppError::ThemeRequired);
    }
    storage.update_theme(user_id, theme).await
}

/// Completed/pending counters for the caller.
pub async fn status<S: Storage>(storage: &S, user_id: &str) -> Result<UserStatusView, AppError> {
    let num_of_done = storage.count_todos(user_id, TODO_STATUS_COMPLETED).await?;
    let num_of_undone = storage.count_todos(user_id, TODO_STATUS_PENDING).await?;

    Ok(UserStatusView {
        num_of_done,
        num_of_undone,
    })
}
