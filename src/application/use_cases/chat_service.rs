//! Chat session orchestration.
//!
//! Owns the transcript for one interactive session and drives a submission
//! end to end: schema snapshot -> prompt -> completion -> transcript append.
//! The transcript lock is held for the whole turn, so submissions are
//! handled one at a time.

use crate::application::use_cases::prompt_builder;
use crate::domain::chat::{ChatMessage, GREETING};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::db::SchemaProvider;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct ChatService {
    schema_provider: Arc<dyn SchemaProvider + Send + Sync>,
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    llm_config: LLMConfig,
    history: Mutex<Vec<ChatMessage>>,
}

impl ChatService {
    pub fn new(
        schema_provider: Arc<dyn SchemaProvider + Send + Sync>,
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        llm_config: LLMConfig,
    ) -> Self {
        Self {
            schema_provider,
            llm_client,
            llm_config,
            history: Mutex::new(vec![ChatMessage::assistant(GREETING)]),
        }
    }

    /// Snapshot of the transcript in display order.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.clone()
    }

    /// Handle one user submission. Whitespace-only input is rejected before
    /// any state change or remote call. On success the user turn and the
    /// generated reply are appended as a pair; on failure nothing is
    /// appended, so a failed turn leaves the transcript exactly as it was.
    /// The question of an aborted turn is intentionally not kept: the
    /// transcript only ever holds complete user/assistant pairs.
    pub async fn submit(&self, text: &str) -> Result<(ChatMessage, ChatMessage)> {
        let question = text.trim();
        if question.is_empty() {
            return Err(AppError::ValidationError("Message is empty".to_string()));
        }

        let mut history = self.history.lock().await;

        let schema = self.schema_provider.describe_schema().await.map_err(|e| {
            warn!("Schema lookup failed, aborting turn: {}", e);
            e
        })?;

        let prompt = prompt_builder::build(&schema, &history, question);

        info!("Generating SQL for question: {}", question);
        let reply = self
            .llm_client
            .generate(&self.llm_config, prompt_builder::SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                warn!("Completion failed, aborting turn: {}", e);
                e
            })?;

        let user_turn = ChatMessage::user(question);
        let assistant_turn = ChatMessage::assistant(reply);
        history.push(user_turn.clone());
        history.push(assistant_turn.clone());

        Ok((user_turn, assistant_turn))
    }
}
