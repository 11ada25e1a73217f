use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{create_event, delete_event, list_events, month_grid};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", delete(delete_event))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/events", get(list_events))
        .route("/grid", get(month_grid))
        .merge(admin)
}
