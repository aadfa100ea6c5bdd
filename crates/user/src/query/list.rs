use reptrack_db::table::Users;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

impl super::Query {
    pub async fn list(&self) -> reptrack_shared::Result<Vec<UserView>> {
        let statement = sea_query::Query::select()
            .columns([Users::Id, Users::Name, Users::Email, Users::CreatedAt])
            .from(Users::Table)
            .order_by(Users::CreatedAt, Order::Asc)
            .order_by(Users::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> reptrack_shared::Result<Option<UserView>> {
        let statement = sea_query::Query::select()
            .columns([Users::Id, Users::Name, Users::Email, Users::CreatedAt])
            .from(Users::Table)
            .and_where(Expr::col(Users::Email).eq(email.into().to_lowercase()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
