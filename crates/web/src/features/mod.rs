pub mod auth;
pub mod calendar;
pub mod health;
pub mod locations;
pub mod organizations;
pub mod sitemap;
pub mod sports;
pub mod tournaments;
pub mod users;
