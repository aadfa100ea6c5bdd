use std::sync::Arc;

use reptrack_exercise::{Command, InsertRepInput};
use serde::Deserialize;
use serde_json::json;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use validator::Validate;

use crate::{
    Content, ContentPart, FunctionDeclaration, FunctionResponse, LlmClient, Tool,
};

pub const INSERT_EXERCISE_REP: &str = "insertExerciseRep";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssistantInput {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertExerciseRepArgs {
    user_name: Option<String>,
    exercise_name: String,
    quantity: f64,
    time_done: Option<String>,
}

pub fn insert_exercise_rep_tool() -> Tool {
    Tool {
        function_declarations: vec![FunctionDeclaration {
            name: INSERT_EXERCISE_REP.to_owned(),
            description: "Insert an exercise repetition record into the database.".to_owned(),
            parameters: Some(json!({
                "type": "OBJECT",
                "properties": {
                    "userName": {
                        "type": "STRING",
                        "description": "The name of the user performing the exercise."
                    },
                    "exerciseName": {
                        "type": "STRING",
                        "description": "The name of the exercise being performed."
                    },
                    "quantity": {
                        "type": "NUMBER",
                        "description": "The number of repetitions performed."
                    },
                    "timeDone": {
                        "type": "STRING",
                        "description": "The time when the exercise was performed. Date and time format. If no date given, use today, if no time given use current time."
                    }
                },
                "required": ["userName", "exerciseName", "quantity", "timeDone"]
            })),
        }],
    }
}

pub fn build_prompt(username: &str, now: OffsetDateTime, text: &str) -> reptrack_shared::Result<String> {
    let now = now
        .format(&Rfc3339)
        .map_err(|e| reptrack_shared::Error::Server(e.to_string()))?;

    Ok(format!("Username is {username}. Today is {now}  Exercise Text: {text}"))
}

/// Turns free text such as "I just did 30 pushups" into an exercise record.
#[derive(Clone)]
pub struct Assistant {
    llm: Arc<dyn LlmClient>,
    command: Command,
}

impl Assistant {
    pub fn new(llm: Arc<dyn LlmClient>, command: Command) -> Self {
        Self { llm, command }
    }

    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn insert_from_text(
        &self,
        input: AssistantInput,
    ) -> reptrack_shared::Result<AssistantReply> {
        let input = AssistantInput {
            username: input.username.trim().to_owned(),
            text: input.text.trim().to_owned(),
        };
        input.validate()?;

        let tools = [insert_exercise_rep_tool()];
        let prompt = build_prompt(&input.username, OffsetDateTime::now_utc(), &input.text)?;
        let mut contents = vec![Content::user(vec![ContentPart::text(prompt)])];

        let answer = self.llm.generate(&contents, &tools).await?;
        let Some(call) = answer.function_calls().next().cloned() else {
            tracing::warn!(text = %answer.text(), "No function call found in response");
            reptrack_shared::upstream!("No function call found in response.");
        };

        if call.name != INSERT_EXERCISE_REP {
            reptrack_shared::upstream!("Unknown function call '{}'", call.name);
        }

        let args = serde_json::from_value::<InsertExerciseRepArgs>(call.args.clone())
            .map_err(|e| {
                reptrack_shared::Error::Upstream(format!("Invalid {INSERT_EXERCISE_REP} arguments: {e}"))
            })?;

        if args
            .user_name
            .as_deref()
            .is_some_and(|name| name.trim() != input.username)
        {
            tracing::warn!(
                requested = %input.username,
                model = ?args.user_name,
                "Ignoring username picked by the model"
            );
        }

        let id = self
            .command
            .insert_rep(InsertRepInput {
                username: input.username.to_owned(),
                exercise_name: args.exercise_name.to_owned(),
                quantity: args.quantity,
                quantity_unit: None,
                performed_at: args.time_done.to_owned(),
            })
            .await?;

        contents.push(answer);
        contents.push(Content::user(vec![ContentPart::FunctionResponse {
            function_response: FunctionResponse {
                name: INSERT_EXERCISE_REP.to_owned(),
                response: json!({
                    "id": id,
                    "userName": input.username,
                    "exerciseName": args.exercise_name,
                    "quantity": args.quantity,
                    "timeDone": args.time_done,
                }),
            },
        }]));

        let answer = self.llm.generate(&contents, &tools).await?;
        let mut message = answer.text().trim().to_owned();
        if message.is_empty() {
            message = format!("Saved {} {}.", args.quantity, args.exercise_name);
        }

        Ok(AssistantReply { id, message })
    }
}
