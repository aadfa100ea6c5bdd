use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ExerciseRepPlanned;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ExerciseRepPlanned::Table)
        .col(
            ColumnDef::new(ExerciseRepPlanned::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ExerciseRepPlanned::Username)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(ExerciseRepPlanned::ExerciseName)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ExerciseRepPlanned::Quantity)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(ExerciseRepPlanned::DatePlanned)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ExerciseRepPlanned::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ExerciseRepPlanned::Table).to_owned()
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

pub struct CreateUsernameDatePlannedIdx;

fn create_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_exercise_rep_planned_username_date_planned")
        .table(ExerciseRepPlanned::Table)
        .col(ExerciseRepPlanned::Username)
        .col(ExerciseRepPlanned::DatePlanned)
        .to_owned()
}

fn drop_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_exercise_rep_planned_username_date_planned")
        .table(ExerciseRepPlanned::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUsernameDatePlannedIdx {
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
