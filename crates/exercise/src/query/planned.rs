use reptrack_db::table::ExerciseRepPlanned;
use reptrack_shared::{Result, start_of_day};
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;

use crate::PlannedExerciseRecord;

impl super::Query {
    /// Goals of `username` planned between `start` and `end`, both days
    /// included.
    pub async fn filter_planned(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<PlannedExerciseRecord>> {
        let statement = sea_query::Query::select()
            .columns([
                ExerciseRepPlanned::Id,
                ExerciseRepPlanned::Username,
                ExerciseRepPlanned::ExerciseName,
                ExerciseRepPlanned::Quantity,
                ExerciseRepPlanned::DatePlanned,
            ])
            .from(ExerciseRepPlanned::Table)
            .and_where(Expr::col(ExerciseRepPlanned::Username).eq(username))
            .and_where(
                Expr::col(ExerciseRepPlanned::DatePlanned)
                    .between(start_of_day(start), start_of_day(end)),
            )
            .order_by(ExerciseRepPlanned::DatePlanned, Order::Asc)
            .order_by(ExerciseRepPlanned::ExerciseName, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let records = sqlx::query_as_with::<_, PlannedExerciseRecord, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        tracing::debug!(username, %start, %end, total = records.len(), "Filtered planned exercises");

        Ok(records)
    }
}
