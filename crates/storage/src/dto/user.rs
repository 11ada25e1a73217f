use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Sport, User};
use crate::validation::validate_nickname;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub role: String,
    pub profile_completed: bool,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
            birth_date: user.birth_date,
            avatar_url: user.avatar_url,
            country_code: user.country_code,
            city: user.city,
            role: user.role,
            profile_completed: user.profile_completed,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "missing_fields"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "missing_fields"))]
    pub last_name: String,

    #[validate(length(max = 50), custom(function = "validate_nickname"))]
    pub nickname: Option<String>,

    pub birth_date: NaiveDate,

    #[validate(url, length(max = 500))]
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    /// Blank nicknames are stored as `NULL`.
    pub fn normalized_nickname(&self) -> Option<String> {
        self.nickname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSportsResponse {
    pub all_sports: Vec<Sport>,
    pub user_sports_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSportsRequest {
    #[serde(default)]
    pub sports: Vec<Uuid>,
}
