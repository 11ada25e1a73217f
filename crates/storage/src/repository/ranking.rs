use sqlx::{PgPool, QueryBuilder};

use crate::dto::tournament::RankingQuery;
use crate::error::Result;
use crate::models::Ranking;

pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Rankings ordered by position, with the total matching rows.
    pub async fn list(&self, filter: &RankingQuery) -> Result<(Vec<Ranking>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM rankings r WHERE 1=1");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT r.id, r.year, r.event_id, r.category_id, r.age_group_id, r.gender,
                   r.position, r.athlete_id,
                   a.first_name || ' ' || a.last_name AS athlete_name,
                   r.time_value
            FROM rankings r
            INNER JOIN athletes a ON a.id = r.athlete_id
            WHERE 1=1
            "#,
        );
        push_filters(&mut query, filter);
        query.push(" ORDER BY r.year DESC, r.event_id, r.position LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let rankings = query
            .build_query_as::<Ranking>()
            .fetch_all(self.pool)
            .await?;

        Ok((rankings, total))
    }
}

fn push_filters<'q>(query: &mut QueryBuilder<'q, sqlx::Postgres>, filter: &'q RankingQuery) {
    if let Some(year) = filter.year {
        query.push(" AND r.year = ");
        query.push_bind(year);
    }

    if let Some(event_id) = filter.event_id {
        query.push(" AND r.event_id = ");
        query.push_bind(event_id);
    }

    if let Some(ref gender) = filter.gender {
        query.push(" AND r.gender = ");
        query.push_bind(gender);
    }
}
