use axum::{Json, extract::State};
use storage::{models::Sport, repository::SportRepository};

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/sports",
    responses(
        (status = 200, description = "Sports that have not been deleted", body = Vec<Sport>)
    ),
    tag = "sports"
)]
pub async fn list_sports(State(state): State<AppState>) -> ApiResult<Json<Vec<Sport>>> {
    let sports = SportRepository::new(state.db.pool()).list().await?;
    Ok(Json(sports))
}
