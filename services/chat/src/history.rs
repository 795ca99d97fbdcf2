//! Per-user chat history

use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::HistoryEntry,
    repositories::{ChatRepository, UserRepository},
};

#[derive(Clone)]
pub struct HistoryReader {
    users: UserRepository,
    chats: ChatRepository,
}

impl HistoryReader {
    pub fn new(users: UserRepository, chats: ChatRepository) -> Self {
        Self { users, chats }
    }

    /// All turns of `username`, oldest first
    pub async fn history(&self, username: &str) -> ApiResult<Vec<HistoryEntry>> {
        info!("Fetching chat history for user: {}", username);

        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            warn!("History requested for unknown user: {}", username);
            ApiError::Unauthorized("User not found".to_string())
        })?;

        let turns = self.chats.list_by_user(user.id).await?;

        Ok(turns.into_iter().map(HistoryEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::TIMESTAMP_FORMAT, testing::test_pool};
    use chrono::NaiveDateTime;

    async fn setup() -> (HistoryReader, UserRepository, ChatRepository) {
        let pool = test_pool().await;
        let users = UserRepository::new(pool.clone());
        let chats = ChatRepository::new(pool);
        (
            HistoryReader::new(users.clone(), chats.clone()),
            users,
            chats,
        )
    }

    #[tokio::test]
    async fn test_history_in_insertion_order() {
        let (reader, users, chats) = setup().await;
        let alice = users.create("alice", "pw").await.unwrap();

        chats.create(alice.id, "one", "1").await.unwrap();
        chats.create(alice.id, "two", "2").await.unwrap();
        chats.create(alice.id, "three", "3").await.unwrap();

        let entries = reader.history("alice").await.unwrap();
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.question.as_str(), e.answer.as_str()))
            .collect();
        assert_eq!(pairs, vec![("one", "1"), ("two", "2"), ("three", "3")]);

        let stamps: Vec<NaiveDateTime> = entries
            .iter()
            .map(|e| NaiveDateTime::parse_from_str(&e.at, TIMESTAMP_FORMAT).unwrap())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_history_empty_for_new_user() {
        let (reader, users, _) = setup().await;
        users.create("alice", "pw").await.unwrap();

        assert!(reader.history("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_only_contains_own_turns() {
        let (reader, users, chats) = setup().await;
        let alice = users.create("alice", "pw").await.unwrap();
        let bob = users.create("bob", "pw").await.unwrap();

        chats.create(alice.id, "mine", "a").await.unwrap();
        chats.create(bob.id, "theirs", "b").await.unwrap();

        let entries = reader.history("bob").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question, "theirs");
    }

    #[tokio::test]
    async fn test_history_unknown_user() {
        let (reader, _, _) = setup().await;

        assert!(matches!(
            reader.history("nobody").await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
