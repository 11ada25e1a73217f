use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::features;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Deporty API",
        description = "Sports tournaments, calendars and athlete accounts for Latin America"
    ),
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::refresh,
        features::auth::handlers::logout,
        features::auth::handlers::me,
        features::auth::handlers::forgot_password,
        features::auth::handlers::reset_password,
        features::auth::handlers::google_start,
        features::auth::handlers::google_callback,
        features::locations::handlers::list_countries,
        features::locations::handlers::get_country,
        features::locations::handlers::list_cities,
        features::users::handlers::update_location,
        features::users::handlers::get_profile,
        features::users::handlers::update_profile,
        features::users::handlers::get_sports,
        features::users::handlers::update_sports,
        features::calendar::handlers::list_events,
        features::calendar::handlers::month_grid,
        features::calendar::handlers::create_event,
        features::calendar::handlers::delete_event,
        features::sports::handlers::list_sports,
        features::organizations::handlers::list_federations,
        features::organizations::handlers::get_federation,
        features::organizations::handlers::create_federation,
        features::organizations::handlers::list_leagues,
        features::organizations::handlers::create_league,
        features::organizations::handlers::list_clubs,
        features::organizations::handlers::create_club,
        features::organizations::handlers::list_athletes,
        features::organizations::handlers::get_athlete,
        features::organizations::handlers::create_athlete,
        features::tournaments::handlers::list_championship_types,
        features::tournaments::handlers::list_competition_events,
        features::tournaments::handlers::list_championships,
        features::tournaments::handlers::get_championship,
        features::tournaments::handlers::create_championship,
        features::tournaments::handlers::list_tournaments,
        features::tournaments::handlers::get_tournament,
        features::tournaments::handlers::create_tournament,
        features::tournaments::handlers::list_entries,
        features::tournaments::handlers::create_entry,
        features::tournaments::handlers::record_result,
        features::tournaments::handlers::list_rankings,
        features::health::handlers::health,
    ),
    components(
        schemas(
            crate::error::ErrorCode,
            crate::error::ErrorResponse,
            storage::dto::auth::SessionUser,
            storage::dto::auth::RegisterRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::LoginResponse,
            storage::dto::auth::SessionResponse,
            storage::dto::auth::MessageResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::location::CountrySummary,
            storage::dto::user::ProfileResponse,
            storage::services::calendar::AdjustedEvent,
            storage::services::calendar::DayCell,
            storage::models::Country,
            storage::models::Sport,
            storage::models::CalendarEvent,
        )
    ),
    tags(
        (name = "auth", description = "Registration, sessions and password recovery"),
        (name = "locations", description = "Countries and cities"),
        (name = "users", description = "Profile, location and sport preferences of the caller"),
        (name = "calendar", description = "Recurring sports calendar"),
        (name = "sports", description = "Sports catalogue"),
        (name = "organizations", description = "Federations, leagues, clubs and athletes"),
        (name = "tournaments", description = "Championships, tournaments, entries and rankings"),
        (name = "health", description = "Liveness and database reachability"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
