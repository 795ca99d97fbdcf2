//! Application state shared across handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    accounts::AccountManager,
    chat::ChatOrchestrator,
    gemini::CompletionClient,
    history::HistoryReader,
    repositories::{ChatRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub accounts: AccountManager,
    pub chat: ChatOrchestrator,
    pub history: HistoryReader,
}

impl AppState {
    /// Wire the components onto one pool and one completion client
    pub fn new(db_pool: SqlitePool, completion: Arc<dyn CompletionClient>) -> Self {
        let users = UserRepository::new(db_pool.clone());
        let chats = ChatRepository::new(db_pool.clone());

        Self {
            accounts: AccountManager::new(users.clone()),
            chat: ChatOrchestrator::new(users.clone(), chats.clone(), completion),
            history: HistoryReader::new(users, chats),
            db_pool,
        }
    }
}
