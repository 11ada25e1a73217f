use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    create_athlete, create_club, create_federation, create_league, get_athlete, get_federation,
    list_athletes, list_clubs, list_federations, list_leagues,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

/// Federations, leagues, clubs and athletes, mounted under `/api`.
pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/federations", post(create_federation))
        .route("/leagues", post(create_league))
        .route("/clubs", post(create_club))
        .route("/athletes", post(create_athlete))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/federations", get(list_federations))
        .route("/federations/:id", get(get_federation))
        .route("/federations/:id/leagues", get(list_leagues))
        .route("/leagues/:id/clubs", get(list_clubs))
        .route("/athletes", get(list_athletes))
        .route("/athletes/:id", get(get_athlete))
        .merge(admin)
}
