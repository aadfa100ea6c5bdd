use reptrack_shared::Result;
use time::Date;

use crate::{ExerciseRecord, PlannedExerciseRecord};

/// Read access to the records a calendar month is built from.
///
/// Both ranges are inclusive and compared on the UTC date.
#[async_trait::async_trait]
pub trait CalendarSource: Send + Sync {
    async fn filter_reps(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<ExerciseRecord>>;

    async fn filter_planned(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<PlannedExerciseRecord>>;
}

#[async_trait::async_trait]
impl CalendarSource for crate::Query {
    async fn filter_reps(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<ExerciseRecord>> {
        crate::Query::filter_reps(self, username, start, end).await
    }

    async fn filter_planned(
        &self,
        username: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<PlannedExerciseRecord>> {
        crate::Query::filter_planned(self, username, start, end).await
    }
}
