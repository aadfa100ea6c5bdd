use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use reptrack_exercise::{CalendarCell, grid_range};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{error::ApiResult, routes::AppState, template::Template};

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub username: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Month requested by a calendar URL, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRequest {
    pub username: String,
    pub month: u32,
    pub year: i32,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl MonthRequest {
    /// Missing values fall back to the configured user and the current UTC
    /// month. Range checks are left to the calendar.
    pub fn resolve(
        params: &CalendarParams,
        default_username: &str,
        today: Date,
    ) -> reptrack_shared::Result<Self> {
        let username = non_empty(&params.username)
            .unwrap_or(default_username)
            .to_owned();

        let month = match non_empty(&params.month) {
            Some(value) => match value.parse::<u32>() {
                Ok(month) => month,
                Err(_) => reptrack_shared::invalid!("month must be a number, got '{}'", value),
            },
            None => u32::from(u8::from(today.month())),
        };

        let year = match non_empty(&params.year) {
            Some(value) => match value.parse::<i32>() {
                Ok(year) => year,
                Err(_) => reptrack_shared::invalid!("year must be a number, got '{}'", value),
            },
            None => today.year(),
        };

        Ok(Self {
            username,
            month,
            year,
        })
    }
}

fn shift_month(month: Month, year: i32, forward: bool) -> (u8, i32) {
    match (month, forward) {
        (Month::December, true) => (1, year + 1),
        (Month::January, false) => (12, year - 1),
        (month, true) => (month.next().into(), year),
        (month, false) => (month.previous().into(), year),
    }
}

#[derive(askama::Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate {
    pub current_path: String,
    pub username: String,
    pub month: u8,
    pub year: i32,
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub weeks: Vec<Vec<CalendarCell>>,
    pub prev: (u8, i32),
    pub next: (u8, i32),
    pub error: Option<String>,
}

impl CalendarTemplate {
    fn new(current_path: String, request: &MonthRequest) -> Self {
        Self {
            current_path,
            username: request.username.to_owned(),
            month: 0,
            year: request.year,
            title: String::new(),
            weekdays: WEEKDAYS,
            weeks: vec![],
            prev: (0, 0),
            next: (0, 0),
            error: None,
        }
    }

    fn with_cells(mut self, month: Month, cells: Vec<CalendarCell>) -> Self {
        self.month = month.into();
        self.title = format!("{} {}", month, self.year);
        self.prev = shift_month(month, self.year, false);
        self.next = shift_month(month, self.year, true);
        self.weeks = cells.chunks(7).map(<[CalendarCell]>::to_vec).collect();
        self
    }

    fn with_error(mut self, error: String) -> Self {
        self.title = "Calendar".to_owned();
        self.error = Some(error);
        self
    }

    pub fn is_current(&self, cell: &CalendarCell) -> bool {
        cell.is_in_month(self.month)
    }
}

#[tracing::instrument(skip_all)]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> impl IntoResponse {
    let today = reptrack_shared::utc_today();
    let request = match MonthRequest::resolve(&params, &app.config.calendar.default_username, today)
    {
        Ok(request) => request,
        Err(err) => {
            let fallback = MonthRequest {
                username: app.config.calendar.default_username.to_owned(),
                month: u32::from(u8::from(today.month())),
                year: today.year(),
            };

            return template.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                CalendarTemplate::new(template.current_path(), &fallback).with_error(err.to_string()),
            );
        }
    };

    let result = app
        .calendar
        .month(&request.username, request.month, request.year)
        .await;

    if let Err(err) = &result {
        if err.is_client() {
            return template.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                CalendarTemplate::new(template.current_path(), &request).with_error(err.to_string()),
            );
        }
    }

    let cells = crate::try_page_response!(sync: result, template);
    let month = crate::try_page_response!(sync: reptrack_exercise::parse_month(request.month), template);

    template.render(CalendarTemplate::new(template.current_path(), &request).with_cells(month, cells))
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub username: String,
    pub month: u32,
    pub year: i32,
    pub start: Date,
    pub end: Date,
    pub cells: Vec<CalendarCell>,
}

#[tracing::instrument(skip_all)]
pub async fn json(
    State(app): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> ApiResult<Json<CalendarResponse>> {
    let request = MonthRequest::resolve(
        &params,
        &app.config.calendar.default_username,
        reptrack_shared::utc_today(),
    )?;

    let cells = app
        .calendar
        .month(&request.username, request.month, request.year)
        .await?;
    let range = grid_range(request.year, request.month)?;

    Ok(Json(CalendarResponse {
        username: request.username,
        month: request.month,
        year: request.year,
        start: range.start,
        end: range.end,
        cells,
    }))
}
