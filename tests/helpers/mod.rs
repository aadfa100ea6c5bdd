#![allow(dead_code)]

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use reptrack::{AppState, config::Config};
use reptrack_assistant::{Content, LlmClient, Tool};
use reptrack_notification::Mailer;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub llm: Arc<ScriptedLlm>,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    setup_test_app_with(path, []).await
}

pub async fn setup_test_app_with(
    path: PathBuf,
    answers: impl IntoIterator<Item = Content>,
) -> anyhow::Result<TestApp> {
    let mut config = Config::load(Some("does/not/exist.toml".to_owned()))?;
    config.database.url = format!("sqlite:{}", path.to_string_lossy());
    config.calendar.default_username = "james".to_owned();

    let pool = reptrack::db::create_pool(&config.database.url, 1).await?;
    reptrack_db::migrate(&pool).await?;

    let llm = Arc::new(ScriptedLlm::new(answers));
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(config, pool.clone(), llm.clone(), mailer.clone());

    Ok(TestApp {
        router: reptrack::routes::router(state),
        pool,
        llm,
        mailer,
    })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<Response<Body>> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> anyhow::Result<Response<Body>> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, body: &[(&str, &str)]) -> anyhow::Result<Response<Body>> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(serde_urlencoded::to_string(body)?))?,
        )
        .await
    }
}

pub async fn body_string(response: Response<Body>) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response<Body>) -> anyhow::Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(serde_json::from_slice(&bytes)?)
}

/// Replays canned answers in order.
#[derive(Default)]
pub struct ScriptedLlm {
    answers: Mutex<VecDeque<Content>>,
}

impl ScriptedLlm {
    pub fn new(answers: impl IntoIterator<Item = Content>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(
        &self,
        _contents: &[Content],
        _tools: &[Tool],
    ) -> reptrack_shared::Result<Content> {
        match self.answers.lock().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => Err(reptrack_shared::Error::Upstream("no more answers".to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub plain: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send_plain(&self, to: &str, subject: &str, plain: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            plain: plain.to_owned(),
        });

        Ok(())
    }
}
