use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use reptrack_exercise::{InsertPlannedInput, InsertRepInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiResult, routes::AppState, template::Template};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RepForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub quantity_unit: String,
    #[serde(default)]
    pub performed_at: String,
}

impl RepForm {
    fn to_input(&self) -> reptrack_shared::Result<InsertRepInput> {
        let Ok(quantity) = self.quantity.trim().parse::<f64>() else {
            reptrack_shared::invalid!("quantity must be a number, got '{}'", self.quantity);
        };

        Ok(InsertRepInput {
            username: self.username.to_owned(),
            exercise_name: self.exercise_name.to_owned(),
            quantity,
            quantity_unit: Some(self.quantity_unit.to_owned()),
            performed_at: Some(self.performed_at.to_owned()),
        })
    }

    /// Calendar page showing the month the rep was performed in.
    fn calendar_url(&self) -> String {
        let date = reptrack_shared::parse_datetime(&self.performed_at)
            .map(|at| at.date())
            .unwrap_or_else(|_| reptrack_shared::utc_today());

        let query = serde_urlencoded::to_string([
            ("username", self.username.trim().to_owned()),
            ("month", u8::from(date.month()).to_string()),
            ("year", date.year().to_string()),
        ])
        .unwrap_or_default();

        format!("/exercise-reps?{query}")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewRepParams {
    pub username: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "exercise-new.html")]
pub struct NewRepTemplate {
    pub current_path: String,
    pub form: RepForm,
    pub error: Option<String>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(params): Query<NewRepParams>,
) -> impl IntoResponse {
    let username = params
        .username
        .filter(|username| !username.trim().is_empty())
        .unwrap_or(app.config.calendar.default_username);

    template.render(NewRepTemplate {
        current_path: template.current_path(),
        form: RepForm {
            username,
            quantity_unit: "reps".to_owned(),
            ..Default::default()
        },
        error: None,
    })
}

#[tracing::instrument(skip_all)]
pub async fn action(
    template: Template,
    State(app): State<AppState>,
    Form(form): Form<RepForm>,
) -> impl IntoResponse {
    let result = match form.to_input() {
        Ok(input) => app.exercise_command.insert_rep(input).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        if err.is_client() {
            return template.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                NewRepTemplate {
                    current_path: template.current_path(),
                    error: Some(err.to_string()),
                    form,
                },
            );
        }
    }

    let id = crate::try_page_response!(sync: result, template);
    tracing::debug!(%id, "redirecting to calendar");

    Redirect::to(&form.calendar_url()).into_response()
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<InsertRepInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = app.exercise_command.insert_rep(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

#[tracing::instrument(skip_all)]
pub async fn create_planned(
    State(app): State<AppState>,
    Json(input): Json<InsertPlannedInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = app.exercise_command.insert_planned(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
