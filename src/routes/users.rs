use axum::{Json, extract::State, http::StatusCode};
use reptrack_user::{CreateUserInput, UserView};
use serde_json::{Value, json};

use crate::{error::ApiResult, routes::AppState};

pub async fn list(State(app): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    Ok(Json(app.user_query.list().await?))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = app.user_command.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "User created" })),
    ))
}
