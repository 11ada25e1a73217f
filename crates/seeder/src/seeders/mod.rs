pub mod admin;
pub mod cities;
pub mod locations;
