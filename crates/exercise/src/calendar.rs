use std::collections::BTreeMap;

use reptrack_shared::Result;
use time::{Date, Duration, Month};

use crate::{CalendarCell, CalendarSource, ExerciseRecord, ExerciseStatus, PlannedExerciseRecord};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9998;

/// Inclusive date range of a month view, padded to whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    /// Sunday on or before the first of the month.
    pub start: Date,
    /// Saturday on or after the last day of the month.
    pub end: Date,
}

impl GridRange {
    pub fn days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;

        std::iter::successors(Some(self.start), move |date| {
            date.next_day().filter(|next| *next <= end)
        })
    }
}

pub fn parse_month(month: u32) -> Result<Month> {
    match u8::try_from(month).ok().map(Month::try_from) {
        Some(Ok(month)) => Ok(month),
        _ => reptrack_shared::invalid!("month must be between 1 and 12, got {}", month),
    }
}

pub fn check_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        reptrack_shared::invalid!(
            "year must be between {} and {}, got {}",
            MIN_YEAR,
            MAX_YEAR,
            year
        );
    }

    Ok(())
}

pub fn last_day_of_month(year: i32, month: Month) -> Result<Date> {
    if month == Month::December {
        return Ok(Date::from_calendar_date(year, Month::December, 31)?);
    }

    let Some(last) = Date::from_calendar_date(year, month.next(), 1)?.previous_day() else {
        reptrack_shared::bail!("no day before the first of {} {}", month.next(), year);
    };

    Ok(last)
}

pub fn grid_range(year: i32, month: u32) -> Result<GridRange> {
    let month = parse_month(month)?;
    check_year(year)?;

    let first = Date::from_calendar_date(year, month, 1)?;
    let last = last_day_of_month(year, month)?;

    let lead = i64::from(first.weekday().number_days_from_sunday());
    let trail = 6 - i64::from(last.weekday().number_days_from_sunday());

    let (Some(start), Some(end)) = (
        first.checked_sub(Duration::days(lead)),
        last.checked_add(Duration::days(trail)),
    ) else {
        reptrack_shared::bail!("calendar grid for {} {} is out of range", month, year);
    };

    if end < start {
        reptrack_shared::bail!("inverted calendar grid {} > {}", start, end);
    }

    Ok(GridRange { start, end })
}

fn sum_by_name<'a>(entries: impl Iterator<Item = (&'a str, f64)>) -> BTreeMap<&'a str, f64> {
    let mut totals = BTreeMap::new();
    for (name, quantity) in entries {
        *totals.entry(name).or_insert(0.0) += quantity;
    }

    totals
}

/// Builds the cell of `date` from the records of the whole grid.
///
/// Only planned exercises produce a status entry; extra activity that was
/// not planned is kept in `actual_records` but never affects completion.
pub fn reconcile_day(
    date: Date,
    actual: &[ExerciseRecord],
    planned: &[PlannedExerciseRecord],
) -> Result<CalendarCell> {
    let mut actual_records = vec![];
    for record in actual {
        if record.performed_on()? == date {
            actual_records.push(record.clone());
        }
    }

    let mut planned_records = vec![];
    for record in planned {
        if record.planned_on()? == date {
            planned_records.push(record.clone());
        }
    }

    let done = sum_by_name(
        actual_records
            .iter()
            .map(|record| (record.exercise_name.as_str(), record.quantity)),
    );
    let goals = sum_by_name(
        planned_records
            .iter()
            .map(|record| (record.exercise_name.as_str(), record.quantity)),
    );

    let per_exercise_status = goals
        .iter()
        .map(|(name, planned_quantity)| {
            let done_quantity = done.get(name).copied().unwrap_or(0.0);
            let remaining = planned_quantity - done_quantity;

            ExerciseStatus {
                exercise_name: (*name).to_owned(),
                planned_quantity: *planned_quantity,
                done_quantity,
                remaining,
                completed: remaining <= 0.0,
            }
        })
        .collect::<Vec<_>>();

    let daily_goal_completed = (!per_exercise_status.is_empty())
        .then(|| per_exercise_status.iter().all(|status| status.completed));

    Ok(CalendarCell {
        date,
        actual_records,
        planned_records,
        per_exercise_status,
        daily_goal_completed,
    })
}

/// Month view of one user's actual and planned exercises.
#[derive(Clone)]
pub struct Calendar<S> {
    source: S,
}

impl<S: CalendarSource> Calendar<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns one cell per day of [`grid_range`], in ascending order.
    ///
    /// Input is checked before the source is queried. Any source failure
    /// fails the whole month.
    #[tracing::instrument(skip(self))]
    pub async fn month(&self, username: &str, month: u32, year: i32) -> Result<Vec<CalendarCell>> {
        let username = username.trim();
        if username.is_empty() {
            reptrack_shared::invalid!("username is required");
        }

        let range = grid_range(year, month)?;

        let (actual, planned) = futures::try_join!(
            self.source.filter_reps(username, range.start, range.end),
            self.source.filter_planned(username, range.start, range.end),
        )?;

        tracing::debug!(
            actual = actual.len(),
            planned = planned.len(),
            start = %range.start,
            end = %range.end,
            "Loaded month records"
        );

        let cells = range
            .dates()
            .map(|date| reconcile_day(date, &actual, &planned))
            .collect::<Result<Vec<_>>>()?;

        if cells.len() as i64 != range.days() || cells.len() % 7 != 0 {
            reptrack_shared::bail!(
                "calendar grid has {} cells for {} days",
                cells.len(),
                range.days()
            );
        }

        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use time::{Weekday, macros::date, macros::datetime};

    use super::*;

    #[derive(Clone, Default)]
    struct FakeSource {
        actual: Vec<ExerciseRecord>,
        planned: Vec<PlannedExerciseRecord>,
        calls: Arc<AtomicUsize>,
        fail_reps: bool,
        fail_planned: bool,
    }

    #[async_trait::async_trait]
    impl CalendarSource for FakeSource {
        async fn filter_reps(
            &self,
            username: &str,
            start: Date,
            end: Date,
        ) -> Result<Vec<ExerciseRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reps {
                return Err(reptrack_shared::Error::Storage(sqlx::Error::PoolClosed));
            }

            let mut records = vec![];
            for record in &self.actual {
                let on = record.performed_on()?;
                if record.username == username && on >= start && on <= end {
                    records.push(record.clone());
                }
            }

            Ok(records)
        }

        async fn filter_planned(
            &self,
            username: &str,
            start: Date,
            end: Date,
        ) -> Result<Vec<PlannedExerciseRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_planned {
                return Err(reptrack_shared::Error::Storage(sqlx::Error::PoolClosed));
            }

            let mut records = vec![];
            for record in &self.planned {
                let on = record.planned_on()?;
                if record.username == username && on >= start && on <= end {
                    records.push(record.clone());
                }
            }

            Ok(records)
        }
    }

    fn rep(name: &str, quantity: f64, at: time::OffsetDateTime) -> ExerciseRecord {
        ExerciseRecord {
            id: ulid::Ulid::new().to_string(),
            username: "james".to_owned(),
            exercise_name: name.to_owned(),
            quantity,
            quantity_unit: None,
            performed_at: at.unix_timestamp(),
        }
    }

    fn plan(name: &str, quantity: f64, on: Date) -> PlannedExerciseRecord {
        PlannedExerciseRecord {
            id: ulid::Ulid::new().to_string(),
            username: "james".to_owned(),
            exercise_name: name.to_owned(),
            quantity,
            date_planned: reptrack_shared::start_of_day(on),
        }
    }

    #[test]
    fn test_grid_range_is_week_aligned_for_every_month() {
        for year in [1999, 2000, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let range = grid_range(year, month).unwrap();
                let first = Date::from_calendar_date(year, Month::try_from(month as u8).unwrap(), 1)
                    .unwrap();
                let last = last_day_of_month(year, first.month()).unwrap();

                assert_eq!(range.start.weekday(), Weekday::Sunday);
                assert_eq!(range.end.weekday(), Weekday::Saturday);
                assert_eq!(range.days() % 7, 0, "{year}-{month}");
                assert!(range.start <= first && range.end >= last);
                assert!((first - range.start).whole_days() < 7);
                assert!((range.end - last).whole_days() < 7);
            }
        }
    }

    #[test]
    fn test_grid_range_pads_both_ends() {
        let range = grid_range(2025, 2).unwrap();
        assert_eq!(range.start, date!(2025 - 01 - 26));
        assert_eq!(range.end, date!(2025 - 03 - 01));
        assert_eq!(range.days(), 35);

        let range = grid_range(2015, 2).unwrap();
        assert_eq!(range.start, date!(2015 - 02 - 01));
        assert_eq!(range.end, date!(2015 - 02 - 28));
        assert_eq!(range.days(), 28);
    }

    #[test]
    fn test_grid_range_handles_year_end_and_leap_day() {
        let december = grid_range(2024, 12).unwrap();
        assert_eq!(december.start, date!(2024 - 12 - 01));
        assert_eq!(december.end, date!(2025 - 01 - 04));
        assert_eq!(december.days(), 35);

        let leap = grid_range(2024, 2).unwrap();
        assert_eq!(last_day_of_month(2024, Month::February).unwrap().day(), 29);
        assert_eq!(leap.start, date!(2024 - 01 - 28));
        assert_eq!(leap.end, date!(2024 - 03 - 02));
        assert_eq!(leap.days(), 35);
        assert!(leap.dates().any(|d| d == date!(2024 - 02 - 29)));

        assert_eq!(last_day_of_month(2023, Month::February).unwrap().day(), 28);
        assert_eq!(last_day_of_month(1900, Month::February).unwrap().day(), 28);
        assert_eq!(last_day_of_month(2000, Month::February).unwrap().day(), 29);
    }

    #[test]
    fn test_grid_range_rejects_bad_input() {
        assert!(matches!(
            grid_range(2025, 0),
            Err(reptrack_shared::Error::InvalidInput(_))
        ));
        assert!(matches!(
            grid_range(2025, 13),
            Err(reptrack_shared::Error::InvalidInput(_))
        ));
        assert!(matches!(
            grid_range(-4, 5),
            Err(reptrack_shared::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reconcile_day_sums_sessions_over_goal() {
        let day = date!(2025 - 02 - 21);
        let actual = vec![
            rep("pushups", 30.0, datetime!(2025-02-21 08:00 UTC)),
            rep("pushups", 25.0, datetime!(2025-02-21 18:30 UTC)),
            rep("pushups", 100.0, datetime!(2025-02-22 08:00 UTC)),
        ];
        let planned = vec![plan("pushups", 50.0, day)];

        let cell = reconcile_day(day, &actual, &planned).unwrap();

        assert_eq!(cell.actual_records.len(), 2);
        assert_eq!(cell.planned_records.len(), 1);
        assert_eq!(
            cell.per_exercise_status,
            vec![ExerciseStatus {
                exercise_name: "pushups".to_owned(),
                planned_quantity: 50.0,
                done_quantity: 55.0,
                remaining: -5.0,
                completed: true,
            }]
        );
        assert_eq!(cell.daily_goal_completed, Some(true));
    }

    #[test]
    fn test_reconcile_day_reports_missing_exercise() {
        let day = date!(2025 - 02 - 21);
        let actual = vec![rep("pushups", 50.0, datetime!(2025-02-21 07:15 UTC))];
        let planned = vec![plan("pushups", 50.0, day), plan("squats", 20.0, day)];

        let cell = reconcile_day(day, &actual, &planned).unwrap();

        assert_eq!(cell.per_exercise_status.len(), 2);
        let pushups = &cell.per_exercise_status[0];
        assert_eq!(pushups.exercise_name, "pushups");
        assert!(pushups.completed);

        let squats = &cell.per_exercise_status[1];
        assert_eq!(squats.exercise_name, "squats");
        assert_eq!(squats.done_quantity, 0.0);
        assert_eq!(squats.remaining, 20.0);
        assert!(!squats.completed);
        assert_eq!(cell.daily_goal_completed, Some(false));
    }

    #[test]
    fn test_reconcile_day_without_goal_keeps_activity() {
        let day = date!(2025 - 02 - 21);
        let actual = vec![
            rep("swimming", 30.0, datetime!(2025-02-21 06:00 UTC)),
            rep("pushups", 10.0, datetime!(2025-02-21 21:00 UTC)),
        ];

        let cell = reconcile_day(day, &actual, &[]).unwrap();

        assert!(cell.per_exercise_status.is_empty());
        assert_eq!(cell.daily_goal_completed, None);
        assert_eq!(cell.actual_records.len(), 2);
    }

    #[test]
    fn test_reconcile_day_ignores_unplanned_activity_for_completion() {
        let day = date!(2025 - 02 - 21);
        let actual = vec![rep("running", 5.0, datetime!(2025-02-21 06:00 UTC))];
        let planned = vec![plan("plank", 0.0, day), plan("squats", 10.0, day)];

        let cell = reconcile_day(day, &actual, &planned).unwrap();

        assert_eq!(cell.per_exercise_status.len(), 2);
        assert!(cell.per_exercise_status[0].completed, "zero goal is satisfied");
        assert_eq!(cell.daily_goal_completed, Some(false));
    }

    #[test]
    fn test_reconcile_day_adds_fractional_quantities() {
        let day = date!(2025 - 02 - 21);
        let actual = vec![
            rep("rowing", 12.5, datetime!(2025-02-21 06:00 UTC)),
            rep("rowing", 7.25, datetime!(2025-02-21 07:00 UTC)),
        ];
        let planned = vec![plan("rowing", 19.75, day)];

        let cell = reconcile_day(day, &actual, &planned).unwrap();

        assert_eq!(cell.per_exercise_status[0].done_quantity, 19.75);
        assert_eq!(cell.per_exercise_status[0].remaining, 0.0);
        assert_eq!(cell.daily_goal_completed, Some(true));
    }

    #[test]
    fn test_reconcile_day_splits_on_utc_midnight() {
        let actual = vec![
            rep("pushups", 10.0, datetime!(2025-02-21 23:59:59 UTC)),
            rep("pushups", 20.0, datetime!(2025-02-22 00:00:00 UTC)),
        ];

        let before = reconcile_day(date!(2025 - 02 - 21), &actual, &[]).unwrap();
        let after = reconcile_day(date!(2025 - 02 - 22), &actual, &[]).unwrap();

        assert_eq!(before.actual_records[0].quantity, 10.0);
        assert_eq!(after.actual_records[0].quantity, 20.0);
    }

    #[tokio::test]
    async fn test_month_returns_one_cell_per_grid_day() {
        let source = FakeSource {
            actual: vec![
                rep("pushups", 30.0, datetime!(2025-02-21 08:00 UTC)),
                rep("pushups", 25.0, datetime!(2025-02-21 19:00 UTC)),
                rep("pushups", 5.0, datetime!(2025-01-26 10:00 UTC)),
            ],
            planned: vec![plan("pushups", 50.0, date!(2025 - 02 - 21))],
            ..Default::default()
        };
        let calendar = Calendar::new(source.clone());

        let cells = calendar.month("james", 2, 2025).await.unwrap();
        let range = grid_range(2025, 2).unwrap();

        assert_eq!(cells.len() as i64, range.days());
        assert_eq!(cells.first().unwrap().date, range.start);
        assert_eq!(cells.last().unwrap().date, range.end);
        assert!(cells.windows(2).all(|w| w[0].date.next_day() == Some(w[1].date)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        let padded = &cells[0];
        assert!(!padded.is_in_month(2));
        assert_eq!(padded.actual_records.len(), 1);

        let goal = cells
            .iter()
            .find(|cell| cell.date == date!(2025 - 02 - 21))
            .unwrap();
        assert!(goal.is_completed());
        assert_eq!(
            cells.iter().filter(|c| c.daily_goal_completed.is_some()).count(),
            1
        );

        let again = calendar.month("james", 2, 2025).await.unwrap();
        assert_eq!(cells, again);
    }

    #[tokio::test]
    async fn test_month_rejects_input_before_reading() {
        let source = FakeSource::default();
        let calendar = Calendar::new(source.clone());

        for month in [0, 13] {
            let err = calendar.month("james", month, 2025).await.unwrap_err();
            assert!(err.is_client(), "{err}");
        }

        let err = calendar.month("   ", 2, 2025).await.unwrap_err();
        assert!(err.is_client());

        let err = calendar.month("james", 2, 0).await.unwrap_err();
        assert!(err.is_client());

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_month_fails_whole_when_one_read_fails() {
        let actual = vec![rep("pushups", 30.0, datetime!(2025-02-21 08:00 UTC))];

        for (fail_reps, fail_planned) in [(true, false), (false, true), (true, true)] {
            let calendar = Calendar::new(FakeSource {
                actual: actual.clone(),
                fail_reps,
                fail_planned,
                ..Default::default()
            });

            let err = calendar.month("james", 2, 2025).await.unwrap_err();
            assert!(
                matches!(err, reptrack_shared::Error::Storage(sqlx::Error::PoolClosed)),
                "{err}"
            );
            assert!(!err.is_client());
        }
    }
}
