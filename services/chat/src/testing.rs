//! Shared helpers for unit tests

use async_trait::async_trait;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};

use crate::gemini::CompletionClient;

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = init_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to create schema");
    pool
}

/// Replies with a fixed text and remembers every prompt
pub struct CannedCompletion {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedCompletion {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::default(),
        })
    }
}

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}
