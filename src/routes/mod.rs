use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use reptrack_assistant::{Assistant, LlmClient};
use reptrack_exercise::Calendar;
use reptrack_notification::{Mailer, SmsNotifier};
use sqlx::SqlitePool;

use crate::template::{NotFoundTemplate, Template};

mod assets;
mod assistant;
mod calendar;
mod exercise;
mod health;
mod index;
mod notifications;
mod users;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub pool: SqlitePool,
    pub exercise_command: reptrack_exercise::Command,
    pub calendar: Calendar<reptrack_exercise::Query>,
    pub user_command: reptrack_user::Command,
    pub user_query: reptrack_user::Query,
    pub assistant: Assistant,
    pub sms: SmsNotifier,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        pool: SqlitePool,
        llm: Arc<dyn LlmClient>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let exercise_command = reptrack_exercise::Command(pool.clone());

        Self {
            calendar: Calendar::new(reptrack_exercise::Query(pool.clone())),
            assistant: Assistant::new(llm, exercise_command.clone()),
            sms: SmsNotifier::new(mailer, config.sms.clone()),
            user_command: reptrack_user::Command(pool.clone()),
            user_query: reptrack_user::Query(pool.clone()),
            exercise_command,
            config,
            pool,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(
        axum::http::StatusCode::NOT_FOUND,
        NotFoundTemplate {
            current_path: template.current_path(),
        },
    )
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route(
            "/exercise-reps",
            get(calendar::page).post(exercise::action),
        )
        .route("/exercise-reps/new", get(exercise::page))
        .route("/api/exercise-reps", post(exercise::create))
        .route("/api/exercise-reps/planned", post(exercise::create_planned))
        .route("/api/exercise-reps/calendar", get(calendar::json))
        .route("/api/exercise-reps/assistant", post(assistant::create))
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/notifications/sms", post(notifications::send_sms))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
