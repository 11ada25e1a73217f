pub mod athlete;
pub mod calendar;
pub mod location;
pub mod organization;
pub mod password_reset;
pub mod ranking;
pub mod refresh_token;
pub mod sport;
pub mod tournament;
pub mod user;

pub use athlete::AthleteRepository;
pub use calendar::{CalendarRepository, NewCalendarEvent};
pub use location::LocationRepository;
pub use organization::OrganizationRepository;
pub use password_reset::PasswordResetRepository;
pub use ranking::RankingRepository;
pub use refresh_token::RefreshTokenRepository;
pub use sport::SportRepository;
pub use tournament::TournamentRepository;
pub use user::{NewUser, UserRepository};
