pub mod data;
pub mod error;
pub mod geodb;
pub mod seeders;

pub use error::{Result, SeedError};
pub use geodb::{CityPage, CitySource, GeoDbClient};
