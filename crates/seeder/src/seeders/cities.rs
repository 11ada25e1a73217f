use std::time::Duration;

use sqlx::PgPool;
use storage::repository::LocationRepository;

use crate::error::Result;
use crate::geodb::{CitySource, collect_city_names};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOutcome {
    pub country_code: String,
    /// Cities fetched (dry run) or newly inserted.
    pub cities: usize,
    pub error: Option<String>,
}

pub struct CitySeeder<'a> {
    pool: &'a PgPool,
    source: &'a dyn CitySource,
    page_size: u32,
    delay: Duration,
    dry_run: bool,
}

impl<'a> CitySeeder<'a> {
    pub fn new(pool: &'a PgPool, source: &'a dyn CitySource, dry_run: bool) -> Self {
        Self {
            pool,
            source,
            page_size: crate::geodb::PAGE_SIZE,
            delay: crate::geodb::PAGE_DELAY,
            dry_run,
        }
    }

    /// Country codes to import: the requested ones, else every stored country.
    pub async fn target_countries(&self, requested: &[String]) -> Result<Vec<String>> {
        if !requested.is_empty() {
            return Ok(requested.iter().map(|c| c.trim().to_uppercase()).collect());
        }

        let countries = LocationRepository::new(self.pool).list_countries().await?;
        let mut codes: Vec<String> = countries.into_iter().map(|c| c.code).collect();
        codes.sort();
        Ok(codes)
    }

    async fn seed_country(&self, country_code: &str) -> Result<usize> {
        let names =
            collect_city_names(self.source, country_code, self.page_size, self.delay).await?;

        if self.dry_run {
            return Ok(names.len());
        }

        let repository = LocationRepository::new(self.pool);
        let mut inserted = 0;
        for name in &names {
            if repository.insert_city(country_code, name).await? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Imports every country in turn. A failing country is logged and
    /// reported without stopping the others.
    pub async fn run(&self, countries: &[String]) -> Vec<CountryOutcome> {
        let mut outcomes = Vec::with_capacity(countries.len());

        for code in countries {
            let outcome = match self.seed_country(code).await {
                Ok(count) => {
                    tracing::info!(country = %code, cities = count, dry_run = self.dry_run, "Country imported");
                    CountryOutcome {
                        country_code: code.clone(),
                        cities: count,
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::error!(country = %code, "City import failed: {e}");
                    CountryOutcome {
                        country_code: code.clone(),
                        cities: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let total: usize = outcomes.iter().map(|o| o.cities).sum();
        if self.dry_run {
            tracing::info!(total, "Dry run complete");
        } else {
            tracing::info!(total, "City import complete");
        }

        outcomes
    }
}
