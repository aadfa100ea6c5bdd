use std::{path::PathBuf, str::FromStr};

use reptrack_exercise::{Command, InsertPlannedInput, InsertRepInput, Query};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub struct State {
    pub command: Command,
    pub query: Query,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    reptrack_db::migrate(&pool).await?;

    Ok(State {
        command: Command(pool.clone()),
        query: Query(pool),
    })
}

#[allow(dead_code)]
pub async fn insert_rep(
    cmd: &Command,
    username: &str,
    exercise_name: &str,
    quantity: f64,
    performed_at: &str,
) -> anyhow::Result<String> {
    Ok(cmd
        .insert_rep(InsertRepInput {
            username: username.to_owned(),
            exercise_name: exercise_name.to_owned(),
            quantity,
            quantity_unit: Some("reps".to_owned()),
            performed_at: Some(performed_at.to_owned()),
        })
        .await?)
}

#[allow(dead_code)]
pub async fn insert_planned(
    cmd: &Command,
    username: &str,
    exercise_name: &str,
    quantity: f64,
    date_planned: &str,
) -> anyhow::Result<String> {
    Ok(cmd
        .insert_planned(InsertPlannedInput {
            username: username.to_owned(),
            exercise_name: exercise_name.to_owned(),
            quantity,
            date_planned: date_planned.to_owned(),
        })
        .await?)
}
