pub mod athlete;
pub mod calendar_event;
pub mod competition;
pub mod federation;
pub mod location;
pub mod sport;
pub mod token;
pub mod user;

pub use athlete::Athlete;
pub use calendar_event::CalendarEvent;
pub use competition::{
    Championship, ChampionshipType, CompetitionEvent, Entry, EntryResult, Ranking, Tournament,
};
pub use federation::{Club, Federation, League};
pub use location::{City, Country};
pub use sport::Sport;
pub use token::{PasswordResetToken, RefreshToken};
pub use user::{ROLE_ADMIN, ROLE_USER, User};
