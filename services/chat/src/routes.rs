//! Chat service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::{
    AppState,
    error::ApiError,
    models::{ChatRequest, ChatResponse, Credentials, MessageResponse},
};

/// Create the router for the chat service
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/chat", post(chat))
        .route("/history/:username", get(history))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match common::database::health_check(&state.db_pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "chat-service"
            })),
        ),
        Err(e) => {
            error!("Database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "service": "chat-service"
                })),
            )
        }
    }
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Register success".to_string(),
    }))
}

/// Check credentials
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Login success".to_string(),
    }))
}

/// Send a message to the model
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reply = state
        .chat
        .submit_chat(&payload.username, &payload.message)
        .await?;

    Ok(Json(ChatResponse { reply }))
}

/// All turns of a user
pub async fn history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.history.history(&username).await?;

    Ok(Json(entries))
}
