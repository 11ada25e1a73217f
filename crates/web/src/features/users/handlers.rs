use axum::{Extension, Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use storage::dto::{
    auth::SessionUser,
    location::UpdateLocationRequest,
    user::{ProfileResponse, UpdateProfileRequest, UpdateSportsRequest, UserSportsResponse},
};
use validator::Validate;

use super::services;
use crate::auth::session;
use crate::error::{AppError, ApiResult, ErrorResponse};
use crate::extract::AppJson;
use crate::state::AppState;

#[utoipa::path(
    patch,
    path = "/api/users/location",
    request_body = UpdateLocationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Location saved; the access cookie is reissued"),
        (status = 400, description = "Unknown country or city", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "userId does not match the caller", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn update_location(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    AppJson(req): AppJson<UpdateLocationRequest>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    if req.user_id.is_some_and(|id| id != user.id) {
        return Err(AppError::forbidden("Usuario invalido"));
    }
    req.validate()?;

    let updated =
        services::update_location(state.db.pool(), user.id, &req.country_code, req.city.trim())
            .await?;

    let session_user = SessionUser::from(&updated);
    let access = state
        .jwt
        .sign_access(&session_user)
        .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;
    let jar = jar.add(session::access_cookie(access, state.secure_cookies()));

    Ok((jar, Json(json!({ "success": true, "user": session_user }))))
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile of the caller", body = ProfileResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(services::get_profile(state.db.pool(), user.id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile saved and marked complete", body = ProfileResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    req.validate()?;

    Ok(Json(
        services::update_profile(state.db.pool(), user.id, &req).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/sports",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All sports and the caller's selection", body = UserSportsResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_sports(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<Json<UserSportsResponse>> {
    Ok(Json(services::get_sports(state.db.pool(), user.id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/sports",
    request_body = UpdateSportsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Selection replaced", body = UserSportsResponse),
        (status = 400, description = "Unknown sport", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn update_sports(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    AppJson(req): AppJson<UpdateSportsRequest>,
) -> ApiResult<Json<UserSportsResponse>> {
    Ok(Json(
        services::replace_sports(state.db.pool(), user.id, &req.sports).await?,
    ))
}
