//! Repositories for database operations

use chrono::{NaiveDateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::info;

use crate::models::{ChatTurn, TIMESTAMP_FORMAT, User};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, username: &str, password: &str) -> DatabaseResult<User> {
        info!("Creating new user: {}", username);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        user_from_row(&row)
    }

    /// Find a user by exact username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Find a user matching both username and password exactly
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &SqliteRow) -> DatabaseResult<User> {
    Ok(User {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        username: row.try_get("username").map_err(DatabaseError::Query)?,
        password: row.try_get("password").map_err(DatabaseError::Query)?,
    })
}

/// Chat history repository for database operations
#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    /// Create a new chat history repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a turn for a user, stamped with the current time
    ///
    /// The stamp never goes below the user's latest turn, so insertion order
    /// and timestamp order agree even if the wall clock steps back.
    pub async fn create(
        &self,
        user_id: i64,
        message: &str,
        reply: &str,
    ) -> DatabaseResult<ChatTurn> {
        let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        let row = sqlx::query(
            r#"
            INSERT INTO chat_history (user_id, message, reply, created_at)
            VALUES (
                $1, $2, $3,
                MAX($4, COALESCE((SELECT MAX(created_at) FROM chat_history WHERE user_id = $1), $4))
            )
            RETURNING id, user_id, message, reply, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(reply)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        turn_from_row(&row)
    }

    /// All turns of a user, oldest first
    pub async fn list_by_user(&self, user_id: i64) -> DatabaseResult<Vec<ChatTurn>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, message, reply, created_at
            FROM chat_history
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(turn_from_row).collect()
    }
}

fn turn_from_row(row: &SqliteRow) -> DatabaseResult<ChatTurn> {
    let created_at: String = row.try_get("created_at").map_err(DatabaseError::Query)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
        .map_err(|e| DatabaseError::Query(sqlx::Error::Decode(Box::new(e))))?
        .and_utc();

    Ok(ChatTurn {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        user_id: row.try_get("user_id").map_err(DatabaseError::Query)?,
        message: row.try_get("message").map_err(DatabaseError::Query)?,
        reply: row.try_get("reply").map_err(DatabaseError::Query)?,
        created_at,
    })
}
