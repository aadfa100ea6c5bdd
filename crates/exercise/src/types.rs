use serde::Serialize;
use sqlx::prelude::FromRow;
use time::{Date, OffsetDateTime};

/// A logged exercise session.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ExerciseRecord {
    pub id: String,
    pub username: String,
    pub exercise_name: String,
    pub quantity: f64,
    pub quantity_unit: Option<String>,
    /// UNIX timestamp, seconds.
    pub performed_at: i64,
}

impl ExerciseRecord {
    pub fn performed_on(&self) -> reptrack_shared::Result<Date> {
        reptrack_shared::utc_date(self.performed_at)
    }

    pub fn time_of_day(&self) -> String {
        OffsetDateTime::from_unix_timestamp(self.performed_at)
            .map(|at| format!("{:02}:{:02}", at.hour(), at.minute()))
            .unwrap_or_default()
    }

    pub fn unit(&self) -> &str {
        self.quantity_unit.as_deref().unwrap_or_default()
    }
}

/// Target quantity of an exercise for one calendar date.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PlannedExerciseRecord {
    pub id: String,
    pub username: String,
    pub exercise_name: String,
    pub quantity: f64,
    /// UNIX timestamp of the UTC midnight of the planned date.
    pub date_planned: i64,
}

impl PlannedExerciseRecord {
    pub fn planned_on(&self) -> reptrack_shared::Result<Date> {
        reptrack_shared::utc_date(self.date_planned)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStatus {
    pub exercise_name: String,
    pub planned_quantity: f64,
    pub done_quantity: f64,
    pub remaining: f64,
    pub completed: bool,
}

/// One day of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: Date,
    pub actual_records: Vec<ExerciseRecord>,
    pub planned_records: Vec<PlannedExerciseRecord>,
    pub per_exercise_status: Vec<ExerciseStatus>,
    /// `None` when nothing was planned for the day.
    pub daily_goal_completed: Option<bool>,
}

impl CalendarCell {
    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn is_in_month(&self, month: u8) -> bool {
        u8::from(self.date.month()) == month
    }

    pub fn is_completed(&self) -> bool {
        self.daily_goal_completed == Some(true)
    }

    pub fn is_missed(&self) -> bool {
        self.daily_goal_completed == Some(false)
    }
}
