use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use storage::dto::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, OAuthCallbackQuery,
    RegisterRequest, ResetPasswordRequest, SessionResponse, SessionUser,
};
use validator::Validate;

use super::services;
use crate::auth::{
    google::{self, PROVIDER, STATE_COOKIE, STATE_TTL_SECS},
    jwt::REFRESH_COOKIE,
    session,
};
use crate::error::{AppError, ApiResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

const GOOGLE_COOKIE_PATH: &str = "/api/auth/google";

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    services::register(state.db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Usuario registrado exitosamente")),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session started, auth cookies set", body = LoginResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    req.validate()?;

    let user = services::authenticate(state.db.pool(), &req).await?;
    let (jar, session_user) = session::issue_session(&state, jar, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: "Sesión iniciada correctamente".to_string(),
            user: session_user,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Tokens rotated", body = SessionResponse),
        (status = 401, description = "Missing, invalid or revoked refresh token", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    let secure = state.secure_cookies();

    let Some(token) = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
    else {
        let jar = session::clear_auth_cookies(jar, secure);
        return Ok(unauthenticated(jar));
    };

    match session::rotate_refresh_token(&state, jar, &token).await? {
        (jar, Some(user)) => Ok((jar, Json(SessionResponse { user: Some(user) })).into_response()),
        (jar, None) => Ok(unauthenticated(jar)),
    }
}

fn unauthenticated(jar: CookieJar) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        jar,
        Json(SessionResponse { user: None }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session closed, cookies cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<serde_json::Value>)> {
    if let Some(token) = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
    {
        session::revoke_refresh_token(&state, &token).await?;
    }

    let jar = session::clear_auth_cookies(jar, state.secure_cookies());
    Ok((jar, Json(serde_json::json!({ "success": true }))))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Authenticated user", body = SessionResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn me(Extension(user): Extension<SessionUser>) -> Json<SessionResponse> {
    Json(SessionResponse { user: Some(user) })
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Always succeeds for a well-formed email", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    services::forgot_password(&state, &req).await?;

    Ok(Json(MessageResponse::ok(
        "Si el email existe, recibirás instrucciones para restablecer tu contraseña.",
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    services::reset_password(state.db.pool(), &req).await?;

    Ok(Json(MessageResponse::ok("Contraseña actualizada exitosamente")))
}

#[utoipa::path(
    get,
    path = "/api/auth/google",
    responses(
        (status = 303, description = "Redirect to the Google consent screen"),
        (status = 503, description = "Google sign-in not configured", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn google_start(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Redirect)> {
    let client = state.google.as_ref().ok_or_else(AppError::service_unavailable)?;

    let oauth_state = services::generate_reset_token();
    let url = client.authorize_url(&oauth_state)?;

    let cookie = Cookie::build((STATE_COOKIE, oauth_state))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path(GOOGLE_COOKIE_PATH)
        .secure(state.secure_cookies())
        .max_age(time::Duration::seconds(STATE_TTL_SECS))
        .build();

    Ok((jar.add(cookie), Redirect::to(&url)))
}

#[utoipa::path(
    get,
    path = "/api/auth/google/callback",
    params(OAuthCallbackQuery),
    responses(
        (status = 303, description = "Session started, redirect into the app"),
        (status = 400, description = "State mismatch or provider error", body = ErrorResponse),
        (status = 503, description = "Google sign-in not configured", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    AppQuery(query): AppQuery<OAuthCallbackQuery>,
) -> ApiResult<(CookieJar, Redirect)> {
    let client = state.google.as_ref().ok_or_else(AppError::service_unavailable)?;

    if let Some(error) = query.error.as_deref() {
        return Err(AppError::validation(format!("Google sign-in failed: {error}")));
    }

    let expected = jar.get(STATE_COOKIE).map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(STATE_COOKIE).path(GOOGLE_COOKIE_PATH).build());

    match (expected.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(received)) if !expected.is_empty() && expected == received => {}
        _ => return Err(AppError::validation("Invalid OAuth state")),
    }

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::validation("Missing authorization code"))?;

    let profile = client.exchange_code(code).await?;
    let user = services::oauth_user(state.db.pool(), google::PROVIDER, &profile).await?;
    let (jar, _) = session::issue_session(&state, jar, &user).await?;

    tracing::info!(user_id = %user.id, provider = PROVIDER, "OAuth login");

    let target = if user.country_code.is_none() {
        "/onboarding"
    } else {
        "/dashboard"
    };

    Ok((jar, Redirect::to(target)))
}
