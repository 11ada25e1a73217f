use axum::{
    Router, middleware,
    routing::{get, patch},
};

use super::handlers::{get_profile, get_sports, update_location, update_profile, update_sports};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/location", patch(update_location))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/sports", get(get_sports).put(update_sports))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
