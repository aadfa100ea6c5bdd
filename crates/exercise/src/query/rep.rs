use reptrack_db::table::ExerciseRep;
use reptrack_shared::{Result, start_of_day};
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;

use crate::ExerciseRecord;

const COLUMNS: [ExerciseRep; 6] = [
    ExerciseRep::Id,
    ExerciseRep::Username,
    ExerciseRep::ExerciseName,
    ExerciseRep::Quantity,
    ExerciseRep::QuantityUnit,
    ExerciseRep::PerformedAt,
];

impl super::Query {
    /// Sessions of `username` performed between `start` and `end`, both
    /// days included, oldest first.
    pub async fn filter_reps(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<ExerciseRecord>> {
        let Some(after_end) = end.next_day() else {
            reptrack_shared::bail!("no day after {}", end);
        };

        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(ExerciseRep::Table)
            .and_where(Expr::col(ExerciseRep::Username).eq(username))
            .and_where(Expr::col(ExerciseRep::PerformedAt).gte(start_of_day(start)))
            .and_where(Expr::col(ExerciseRep::PerformedAt).lt(start_of_day(after_end)))
            .order_by(ExerciseRep::PerformedAt, Order::Asc)
            .order_by(ExerciseRep::ExerciseName, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let records = sqlx::query_as_with::<_, ExerciseRecord, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        tracing::debug!(username, %start, %end, total = records.len(), "Filtered exercise reps");

        Ok(records)
    }

    pub async fn find_rep(&self, id: impl Into<String>) -> Result<Option<ExerciseRecord>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(ExerciseRep::Table)
            .and_where(Expr::col(ExerciseRep::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ExerciseRecord, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
