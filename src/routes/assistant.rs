use axum::{Json, extract::State, http::StatusCode};
use reptrack_assistant::AssistantInput;
use serde_json::{Value, json};

use crate::{error::ApiResult, routes::AppState};

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<AssistantInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let reply = app.assistant.insert_from_text(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": reply.id, "message": reply.message })),
    ))
}
