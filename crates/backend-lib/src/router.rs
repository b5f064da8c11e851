// ============================
// ticklist-backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::handlers;
use crate::storage::Storage;
use crate::AppState;

/// Create the API router.
///
/// Login and register are public; every other route sits behind the
/// access gate.
pub fn create_router<S: Storage + 'static>(state: Arc<AppState<S>>) -> Router {
    let public = Router::new()
        .route("/api/user/login", post(handlers::user::login::<S>))
        .route("/api/user/register", post(handlers::user::register::<S>));

    let authenticated = Router::new()
        .route("/api/user/pwd", put(handlers::user::update_password::<S>))
        .route(
            "/api/user/theme/{theme}",
            put(handlers::user::update_theme::<S>),
        )
        .route("/api/user/status", get(handlers::user::status::<S>))
        .route(
            "/api/category",
            get(handlers::category::list::<S>).post(handlers::category::upsert::<S>),
        )
        .route(
            "/api/category/{id}",
            delete(handlers::category::remove::<S>),
        )
        .route(
            "/api/todo",
            get(handlers::todo::page::<S>).post(handlers::todo::upsert::<S>),
        )
        .route("/api/todo/{id}", delete(handlers::todo::remove::<S>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<S>,
        ));

    public
        .merge(authenticated)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
