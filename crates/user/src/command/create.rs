use reptrack_db::table::Users;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn create(&self, input: CreateUserInput) -> reptrack_shared::Result<String> {
        let input = CreateUserInput {
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_lowercase(),
        };
        input.validate()?;

        let id = ulid::Ulid::new().to_string();
        let statment = Query::insert()
            .into_table(Users::Table)
            .columns([Users::Id, Users::Name, Users::Email, Users::CreatedAt])
            .values([
                id.to_owned().into(),
                input.name.into(),
                input.email.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .map_err(anyhow::Error::from)?
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        if let Err(err) = sqlx::query_with(&sql, values).execute(&self.0).await {
            if err
                .as_database_error()
                .is_some_and(|err| err.is_unique_violation())
            {
                reptrack_shared::invalid!("Email already registered");
            }

            return Err(err.into());
        }

        tracing::info!(%id, "User created");

        Ok(id)
    }
}
