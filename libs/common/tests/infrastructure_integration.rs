//! Integration tests for the store infrastructure
//!
//! These tests verify that a fresh SQLite database can be opened, migrated
//! and queried through the public API of the common library.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

/// Opens an in-memory database, creates the schema and exercises both tables
#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::in_memory()).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;

    let user_id: i64 =
        sqlx::query_scalar("INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id")
            .bind("alice")
            .bind("pw1")
            .fetch_one(&pool)
            .await?;

    sqlx::query(
        "INSERT INTO chat_history (user_id, message, reply, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind("hi")
    .bind("hello")
    .bind("2024-01-01 00:00:00.000000")
    .execute(&pool)
    .await?;

    let row = sqlx::query("SELECT message, reply FROM chat_history WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await?;

    let message: String = row.get("message");
    let reply: String = row.get("reply");
    assert_eq!(message, "hi");
    assert_eq!(reply, "hello");

    Ok(())
}

/// Turns must reference an existing user
#[tokio::test]
async fn test_chat_history_requires_user() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::in_memory()).await?;
    run_migrations(&pool).await?;

    let result = sqlx::query(
        "INSERT INTO chat_history (user_id, message, reply, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(42_i64)
    .bind("hi")
    .bind("hello")
    .bind("2024-01-01 00:00:00.000000")
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Foreign key was not enforced");
    Ok(())
}
