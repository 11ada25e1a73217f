use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::calendar::CalendarEventsQuery;
use crate::error::{Result, StorageError, classify_write};
use crate::models::CalendarEvent;
use crate::services::calendar::day_of_week;

const EVENT_SELECT: &str = r#"
    SELECT e.id, e.name, e.sport_id, s.name AS sport_name,
           e.city_id, c.name AS city_name, c.country_code,
           e.color, e.reference_start, e.reference_end,
           e.start_day_of_week, e.end_day_of_week, e.is_recurring,
           e.created_by, e.created_at
    FROM calendar_events e
    INNER JOIN sports s ON s.id = e.sport_id
    INNER JOIN cities c ON c.id = e.city_id
    WHERE e.deleted_at IS NULL
"#;

#[derive(Debug, Clone)]
pub struct NewCalendarEvent<'a> {
    pub name: &'a str,
    pub sport_id: Uuid,
    pub city_id: Uuid,
    pub color: &'a str,
    pub reference_start: NaiveDate,
    pub reference_end: NaiveDate,
    pub is_recurring: bool,
    pub created_by: Uuid,
}

pub struct CalendarRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CalendarRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Live events matching the filters.
    ///
    /// With a year filter, recurring events are always returned (they are
    /// shifted into the requested year later) while one-off events must
    /// overlap that year.
    pub async fn list(&self, filter: &CalendarEventsQuery) -> Result<Vec<CalendarEvent>> {
        let mut query = QueryBuilder::new(EVENT_SELECT);

        if let Some(ref country_code) = filter.country_code {
            query.push(" AND c.country_code = ");
            query.push_bind(country_code);
        }

        if let Some(city_id) = filter.city_id {
            query.push(" AND e.city_id = ");
            query.push_bind(city_id);
        }

        if let Some(sport_id) = filter.sport_id {
            query.push(" AND e.sport_id = ");
            query.push_bind(sport_id);
        }

        if let Some(year) = filter.year {
            query.push(" AND (e.is_recurring OR (EXTRACT(YEAR FROM e.reference_start)::int <= ");
            query.push_bind(year);
            query.push(" AND EXTRACT(YEAR FROM e.reference_end)::int >= ");
            query.push_bind(year);
            query.push("))");
        }

        query.push(" ORDER BY e.reference_start, e.name");

        let events = query
            .build_query_as::<CalendarEvent>()
            .fetch_all(self.pool)
            .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CalendarEvent> {
        let mut query = QueryBuilder::new(EVENT_SELECT);
        query.push(" AND e.id = ");
        query.push_bind(id);

        query
            .build_query_as::<CalendarEvent>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Inserts the event, deriving both day-of-week columns from the dates.
    pub async fn create(&self, event: &NewCalendarEvent<'_>) -> Result<CalendarEvent> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO calendar_events (
                name, sport_id, city_id, color, reference_start, reference_end,
                start_day_of_week, end_day_of_week, is_recurring, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(event.name)
        .bind(event.sport_id)
        .bind(event.city_id)
        .bind(event.color)
        .bind(event.reference_start)
        .bind(event.reference_end)
        .bind(day_of_week(event.reference_start))
        .bind(day_of_week(event.reference_end))
        .bind(event.is_recurring)
        .bind(event.created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| classify_write(e, "Evento duplicado", "Deporte o ciudad inválidos"))?;

        self.find_by_id(id).await
    }

    /// Soft-deletes an event owned by `owner`. Returns `false` when no live
    /// event with that id belongs to the owner.
    pub async fn soft_delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE calendar_events
            SET deleted_at = NOW()
            WHERE id = $1 AND created_by = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
