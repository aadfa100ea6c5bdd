use reptrack_db::table::ExerciseRep;
use reptrack_shared::parse_datetime;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InsertRepInput {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub exercise_name: String,
    pub quantity: f64,
    #[validate(length(max = 20))]
    pub quantity_unit: Option<String>,
    /// Defaults to now. Values without an offset are read as UTC.
    pub performed_at: Option<String>,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username, exercise = %input.exercise_name))]
    pub async fn insert_rep(&self, input: InsertRepInput) -> reptrack_shared::Result<String> {
        let input = InsertRepInput {
            username: input.username.trim().to_owned(),
            exercise_name: input.exercise_name.trim().to_owned(),
            quantity_unit: input
                .quantity_unit
                .map(|unit| unit.trim().to_owned())
                .filter(|unit| !unit.is_empty()),
            ..input
        };

        input.validate()?;
        super::check_quantity(input.quantity)?;

        let performed_at = match input.performed_at.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => parse_datetime(value)?,
            _ => OffsetDateTime::now_utc(),
        };

        let id = ulid::Ulid::new().to_string();
        let statment = Query::insert()
            .into_table(ExerciseRep::Table)
            .columns([
                ExerciseRep::Id,
                ExerciseRep::Username,
                ExerciseRep::ExerciseName,
                ExerciseRep::Quantity,
                ExerciseRep::QuantityUnit,
                ExerciseRep::PerformedAt,
                ExerciseRep::CreatedAt,
            ])
            .values([
                id.to_owned().into(),
                input.username.into(),
                input.exercise_name.into(),
                input.quantity.into(),
                input.quantity_unit.into(),
                performed_at.unix_timestamp().into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .map_err(anyhow::Error::from)?
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(%id, "Exercise rep inserted");

        Ok(id)
    }
}
