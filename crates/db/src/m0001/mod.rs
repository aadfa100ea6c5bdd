mod exercise_rep;
mod exercise_rep_planned;
mod users;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "reptrack",
    "m0001",
    vec_box![],
    vec_box![
        users::CreateTable,
        users::CreateEmailIdx,
        exercise_rep::CreateTable,
        exercise_rep::CreateUsernamePerformedAtIdx,
        exercise_rep_planned::CreateTable,
        exercise_rep_planned::CreateUsernameDatePlannedIdx,
    ]
);
