use std::{collections::VecDeque, path::PathBuf, str::FromStr, sync::Mutex};

use reptrack_assistant::{Content, LlmClient, Tool};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    reptrack_db::migrate(&pool).await?;

    Ok(pool)
}

/// Replays canned answers and records every conversation it receives.
#[derive(Default)]
pub struct ScriptedLlm {
    answers: Mutex<VecDeque<Content>>,
    pub requests: Mutex<Vec<Vec<Content>>>,
}

impl ScriptedLlm {
    pub fn new(answers: impl IntoIterator<Item = Content>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            requests: Mutex::default(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(
        &self,
        contents: &[Content],
        _tools: &[Tool],
    ) -> reptrack_shared::Result<Content> {
        self.requests.lock().unwrap().push(contents.to_vec());

        match self.answers.lock().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => Err(reptrack_shared::Error::Upstream("no more answers".to_owned())),
        }
    }
}
