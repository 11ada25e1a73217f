use sqlx::PgPool;

use crate::dto::location::CountrySummary;
use crate::error::{Result, StorageError};
use crate::models::Country;

pub struct LocationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_countries(&self) -> Result<Vec<CountrySummary>> {
        let countries = sqlx::query_as::<_, CountrySummary>(
            "SELECT code, name FROM countries ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }

    pub async fn find_country(&self, code: &str) -> Result<Country> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT code, name, locale, language, timezone, currency, currency_symbol, phone_code
            FROM countries
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn country_exists(&self, code: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM countries WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// City names of a country, ordered alphabetically.
    pub async fn list_city_names(&self, country_code: &str) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM cities WHERE country_code = $1 ORDER BY name",
        )
        .bind(country_code)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    pub async fn city_exists(&self, country_code: &str, name: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cities WHERE country_code = $1 AND name = $2)",
        )
        .bind(country_code)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn count_cities(&self, country_code: &str) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cities WHERE country_code = $1")
                .bind(country_code)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    pub async fn upsert_country(&self, country: &Country) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO countries (code, name, locale, language, timezone, currency, currency_symbol, phone_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (code) DO UPDATE
            SET name = EXCLUDED.name,
                locale = EXCLUDED.locale,
                language = EXCLUDED.language,
                timezone = EXCLUDED.timezone,
                currency = EXCLUDED.currency,
                currency_symbol = EXCLUDED.currency_symbol,
                phone_code = EXCLUDED.phone_code
            "#,
        )
        .bind(&country.code)
        .bind(&country.name)
        .bind(&country.locale)
        .bind(&country.language)
        .bind(&country.timezone)
        .bind(&country.currency)
        .bind(&country.currency_symbol)
        .bind(&country.phone_code)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Returns `true` when the city was new.
    pub async fn insert_city(&self, country_code: &str, name: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO cities (country_code, name)
            VALUES ($1, $2)
            ON CONFLICT (country_code, name) DO NOTHING
            "#,
        )
        .bind(country_code)
        .bind(name)
        .execute(self.pool)
        .await
        .map_err(|e| {
            crate::error::classify_write(e, "Ciudad duplicada", "Pais desconocido")
        })?;

        Ok(result.rows_affected() == 1)
    }
}
