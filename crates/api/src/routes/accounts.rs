use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers, routes::paths};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(paths::HOME, get(handlers::accounts::home))
        .route(
            paths::SIGNUP,
            get(handlers::accounts::signup_page).post(handlers::accounts::signup),
        )
        .route(
            paths::LOGIN,
            get(handlers::accounts::login_page).post(handlers::accounts::login),
        )
        .route(paths::LOGOUT, get(handlers::accounts::logout))
}
