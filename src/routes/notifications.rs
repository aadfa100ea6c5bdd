use axum::{Json, extract::State};
use reptrack_notification::SendSmsInput;
use serde_json::{Value, json};

use crate::{error::ApiResult, routes::AppState};

#[tracing::instrument(skip_all)]
pub async fn send_sms(
    State(app): State<AppState>,
    Json(input): Json<SendSmsInput>,
) -> ApiResult<Json<Value>> {
    let to = app.sms.send(input).await?;

    Ok(Json(json!({ "message": "SMS sent", "to": to })))
}
