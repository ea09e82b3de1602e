// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::models::Record;
use crate::server::{store, AppState};

pub async fn list_transactions(State(state): State<AppState>) -> impl IntoResponse {
    let conn = state.db.lock().await;
    match store::list(&conn) {
        Ok(records) => (StatusCode::OK, Json(json!(records))),
        Err(e) => internal_error("list", e),
    }
}

pub async fn upsert_transaction(
    State(state): State<AppState>,
    Json(record): Json<Record>,
) -> impl IntoResponse {
    let conn = state.db.lock().await;
    match store::upsert(&conn, &record) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => internal_error("upsert", e),
    }
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let conn = state.db.lock().await;
    match store::delete(&conn, &id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => internal_error("delete", e),
    }
}

fn internal_error(op: &str, e: anyhow::Error) -> (StatusCode, Json<Value>) {
    error!("{op} failed: {e:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}
