pub mod calendar;
pub mod password;
