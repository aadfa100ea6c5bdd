use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ExerciseRep;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ExerciseRep::Table)
        .col(
            ColumnDef::new(ExerciseRep::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ExerciseRep::Username)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(ExerciseRep::ExerciseName)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(ExerciseRep::Quantity).double().not_null())
        .col(
            ColumnDef::new(ExerciseRep::QuantityUnit)
                .string()
                .null()
                .string_len(20),
        )
        .col(
            ColumnDef::new(ExerciseRep::PerformedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ExerciseRep::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ExerciseRep::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateUsernamePerformedAtIdx;

fn create_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_exercise_rep_username_performed_at")
        .table(ExerciseRep::Table)
        .col(ExerciseRep::Username)
        .col(ExerciseRep::PerformedAt)
        .to_owned()
}

fn drop_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_exercise_rep_username_performed_at")
        .table(ExerciseRep::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUsernamePerformedAtIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
