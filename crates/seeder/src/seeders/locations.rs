use sqlx::PgPool;
use storage::{models::Country, repository::LocationRepository};

use crate::data::{CITIES, COUNTRIES, find_duplicates};
use crate::error::Result;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationReport {
    pub countries: usize,
    pub cities_inserted: usize,
    pub cities_skipped: usize,
}

/// Logs any duplicated built-in rows. Returns `true` when the data is clean.
pub fn check_builtin_data() -> bool {
    let country_dupes = find_duplicates(&COUNTRIES, |c| c.code);
    let city_dupes = find_duplicates(&CITIES, |(code, name)| format!("{code}/{name}"));

    if !country_dupes.is_empty() {
        tracing::warn!(duplicates = ?country_dupes, "Duplicated countries in seed data");
    }
    if !city_dupes.is_empty() {
        tracing::warn!(duplicates = ?city_dupes, "Duplicated cities in seed data");
    }

    country_dupes.is_empty() && city_dupes.is_empty()
}

/// Counts what a real run would write without touching the database.
pub fn dry_run() -> LocationReport {
    check_builtin_data();

    LocationReport {
        countries: COUNTRIES.len(),
        cities_inserted: CITIES.len(),
        cities_skipped: 0,
    }
}

/// Upserts the built-in countries and inserts their cities. Existing cities
/// are left untouched.
pub async fn seed_locations(pool: &PgPool) -> Result<LocationReport> {
    check_builtin_data();

    let repository = LocationRepository::new(pool);
    let mut report = LocationReport::default();

    for seed in &COUNTRIES {
        repository.upsert_country(&Country::from(seed)).await?;
        report.countries += 1;
    }
    tracing::info!(count = report.countries, "Countries seeded");

    for (code, name) in CITIES {
        if repository.insert_city(code, name).await? {
            report.cities_inserted += 1;
        } else {
            report.cities_skipped += 1;
        }
    }
    tracing::info!(
        inserted = report.cities_inserted,
        skipped = report.cities_skipped,
        "Cities seeded"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_counts_builtin_rows() {
        let report = dry_run();
        assert_eq!(report.countries, 20);
        assert_eq!(report.cities_inserted, 100);
        assert!(check_builtin_data());
    }
}
