//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomSnapshotDto, usecase::ChatHub};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current participants and history
pub async fn get_room(State(hub): State<Arc<ChatHub>>) -> Json<RoomSnapshotDto> {
    // Domain Model から DTO への変換
    Json(hub.snapshot().await.into())
}
