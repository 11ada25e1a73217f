use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;
use crate::validation::{validate_email, validate_password};

/// Identity carried inside access tokens and returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub role: Option<String>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(crate::models::ROLE_ADMIN)
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            country_code: user.country_code.clone(),
            city: user.city.clone(),
            role: Some(user.role.clone()),
        }
    }
}

/// Request payload for creating an account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, alias = "nombres")]
    #[validate(length(min = 1, max = 255, message = "Faltan campos obligatorios"))]
    pub first_name: String,

    #[serde(default, alias = "apellidos")]
    #[validate(length(min = 1, max = 255, message = "Faltan campos obligatorios"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Correo y contraseña son obligatorios"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Correo y contraseña son obligatorios"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Token inválido"))]
    pub token: String,

    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Profile returned by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthProfile {
    pub subject: String,
    pub email: String,
    pub email_verified: bool,
    pub first_name: String,
    pub last_name: String,
}
