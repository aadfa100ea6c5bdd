use axum::{extract::State, response::IntoResponse};

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_path: String,
    pub username: String,
    pub month: u8,
    pub year: i32,
    pub today: String,
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let today = reptrack_shared::utc_today();

    template.render(IndexTemplate {
        current_path: template.current_path(),
        username: app.config.calendar.default_username,
        month: today.month().into(),
        year: today.year(),
        today: today.to_string(),
    })
}
