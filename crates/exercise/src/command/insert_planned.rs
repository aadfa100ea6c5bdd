use reptrack_db::table::ExerciseRepPlanned;
use reptrack_shared::{parse_date, start_of_day};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InsertPlannedInput {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub exercise_name: String,
    pub quantity: f64,
    /// `YYYY-MM-DD`
    pub date_planned: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username, exercise = %input.exercise_name))]
    pub async fn insert_planned(
        &self,
        input: InsertPlannedInput,
    ) -> reptrack_shared::Result<String> {
        let input = InsertPlannedInput {
            username: input.username.trim().to_owned(),
            exercise_name: input.exercise_name.trim().to_owned(),
            ..input
        };

        input.validate()?;
        super::check_quantity(input.quantity)?;
        let date_planned = parse_date(&input.date_planned)?;

        let id = ulid::Ulid::new().to_string();
        let statment = Query::insert()
            .into_table(ExerciseRepPlanned::Table)
            .columns([
                ExerciseRepPlanned::Id,
                ExerciseRepPlanned::Username,
                ExerciseRepPlanned::ExerciseName,
                ExerciseRepPlanned::Quantity,
                ExerciseRepPlanned::DatePlanned,
                ExerciseRepPlanned::CreatedAt,
            ])
            .values([
                id.to_owned().into(),
                input.username.into(),
                input.exercise_name.into(),
                input.quantity.into(),
                start_of_day(date_planned).into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .map_err(anyhow::Error::from)?
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(%id, "Planned exercise inserted");

        Ok(id)
    }
}
