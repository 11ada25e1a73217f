use sqlx::PgPool;
use storage::{
    dto::user::{ProfileResponse, UpdateProfileRequest, UserSportsResponse},
    models::User,
    repository::{LocationRepository, SportRepository, UserRepository},
};
use uuid::Uuid;

use crate::error::{AppError, ApiResult};

/// Checks that the city belongs to the country before saving both.
pub async fn update_location(
    pool: &PgPool,
    user_id: Uuid,
    country_code: &str,
    city: &str,
) -> ApiResult<User> {
    let locations = LocationRepository::new(pool);

    if !locations.country_exists(country_code).await? {
        return Err(AppError::validation("Pais invalido"));
    }

    if !locations.city_exists(country_code, city).await? {
        return Err(AppError::validation(
            "Ciudad invalida para el pais seleccionado",
        ));
    }

    let user = UserRepository::new(pool)
        .update_location(user_id, country_code, city)
        .await?;

    tracing::info!(user_id = %user.id, country_code, "User location updated");
    Ok(user)
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> ApiResult<ProfileResponse> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    Ok(ProfileResponse::from(user))
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: &UpdateProfileRequest,
) -> ApiResult<ProfileResponse> {
    let user = UserRepository::new(pool)
        .update_profile(user_id, request)
        .await?;
    Ok(ProfileResponse::from(user))
}

pub async fn get_sports(pool: &PgPool, user_id: Uuid) -> ApiResult<UserSportsResponse> {
    let sports = SportRepository::new(pool);
    Ok(UserSportsResponse {
        all_sports: sports.list().await?,
        user_sports_ids: sports.list_user_sport_ids(user_id).await?,
    })
}

pub async fn replace_sports(
    pool: &PgPool,
    user_id: Uuid,
    sport_ids: &[Uuid],
) -> ApiResult<UserSportsResponse> {
    let mut unique = sport_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    SportRepository::new(pool)
        .replace_user_sports(user_id, &unique)
        .await?;

    get_sports(pool, user_id).await
}
