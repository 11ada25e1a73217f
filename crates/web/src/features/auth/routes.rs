use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    forgot_password, google_callback, google_start, login, logout, me, refresh, register,
    reset_password,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/google", get(google_start))
        .route("/google/callback", get(google_callback))
        .merge(protected)
}
