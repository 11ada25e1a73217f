use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use storage::dto::auth::SessionUser;

use crate::auth::jwt::{ACCESS_COOKIE, JwtKeys};
use crate::error::AppError;
use crate::state::AppState;

/// Access token from the session cookie, falling back to a Bearer header.
fn access_token<'a>(jar: &'a CookieJar, headers: &'a HeaderMap) -> Option<&'a str> {
    jar.get(ACCESS_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
}

pub fn authenticate(
    jwt: &JwtKeys,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<SessionUser, AppError> {
    let token = access_token(jar, headers).ok_or_else(AppError::auth_required)?;

    jwt.verify_access(token).map(|claims| claims.user).map_err(|e| {
        tracing::debug!("Access token rejected: {e}");
        AppError::auth_required()
    })
}

/// Rejects unauthenticated requests and exposes the caller as
/// `Extension<SessionUser>`.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state.jwt, &jar, request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state.jwt, &jar, request.headers())?;
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, path = %request.uri().path(), "Admin route denied");
        return Err(AppError::forbidden("forbidden_not_admin"));
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;
    use uuid::Uuid;

    fn user(role: &str) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "admin@deporty.app".to_string(),
            first_name: "Admin".to_string(),
            last_name: "Deporty".to_string(),
            country_code: None,
            city: None,
            role: Some(role.to_string()),
        }
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let jar = CookieJar::new().add(Cookie::new(ACCESS_COOKIE, "from-cookie"));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(access_token(&jar, &headers), Some("from-cookie"));
        assert_eq!(access_token(&CookieJar::new(), &headers), Some("from-header"));
        assert_eq!(access_token(&CookieJar::new(), &HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate_with_bearer_token() {
        let keys = JwtKeys::new("test-secret");
        let admin = user("admin");
        let token = keys.sign_access(&admin).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let authenticated = authenticate(&keys, &CookieJar::new(), &headers).unwrap();
        assert_eq!(authenticated, admin);
        assert!(authenticated.is_admin());
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let keys = JwtKeys::new("test-secret");
        let jar = CookieJar::new().add(Cookie::new(ACCESS_COOKIE, "not-a-jwt"));

        let error = authenticate(&keys, &jar, &HeaderMap::new()).unwrap_err();
        assert_eq!(error.status().as_u16(), 401);
    }
}
