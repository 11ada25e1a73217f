use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    create_championship, create_entry, create_tournament, get_championship, get_tournament,
    list_championship_types, list_championships, list_competition_events, list_entries,
    list_rankings, list_tournaments, record_result,
};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

/// Championships, tournaments, entries and rankings, mounted under `/api`.
pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/championships", post(create_championship))
        .route("/tournaments", post(create_tournament))
        .route("/entries/:id/result", post(record_result))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let authenticated = Router::new()
        .route("/tournaments/:id/entries", post(create_entry))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/championship-types", get(list_championship_types))
        .route("/competition-events", get(list_competition_events))
        .route("/championships", get(list_championships))
        .route("/championships/:id", get(get_championship))
        .route("/championships/:id/tournaments", get(list_tournaments))
        .route("/tournaments/:id", get(get_tournament))
        .route("/tournaments/:id/entries", get(list_entries))
        .route("/rankings", get(list_rankings))
        .merge(admin)
        .merge(authenticated)
}
