use axum::{Router, routing::get};

use super::handlers::{get_country, list_cities, list_countries};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/:code", get(get_country))
        .route("/cities", get(list_cities))
}
