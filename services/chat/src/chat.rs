//! Chat submission: ask the model, clean the answer, record the turn

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    gemini::CompletionClient,
    repositories::{ChatRepository, UserRepository},
    sanitizer::sanitize,
};

/// Runs one chat exchange per call
///
/// The prompt sent out is the message alone; earlier turns are never
/// included. Exactly one turn is stored for every call whose user resolves,
/// whatever the completion client answered.
#[derive(Clone)]
pub struct ChatOrchestrator {
    users: UserRepository,
    chats: ChatRepository,
    completion: Arc<dyn CompletionClient>,
}

impl ChatOrchestrator {
    pub fn new(
        users: UserRepository,
        chats: ChatRepository,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            users,
            chats,
            completion,
        }
    }

    /// Submit a message on behalf of `username` and return the stored reply
    pub async fn submit_chat(&self, username: &str, message: &str) -> ApiResult<String> {
        info!("Chat message from user: {}", username);

        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            warn!("Chat from unknown user: {}", username);
            ApiError::Unauthorized("User not found".to_string())
        })?;

        let raw = self.completion.complete(message).await;
        let reply = sanitize(&raw);

        let turn = self.chats.create(user.id, message, &reply).await?;
        info!("Stored chat turn {} for user {}", turn.id, user.username);

        Ok(turn.reply)
    }
}
