use axum::{Router, routing::get};

use super::handlers::sitemap;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/sitemap.xml", get(sitemap))
}
