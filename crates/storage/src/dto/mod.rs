pub mod auth;
pub mod calendar;
pub mod common;
pub mod location;
pub mod organization;
pub mod tournament;
pub mod user;
