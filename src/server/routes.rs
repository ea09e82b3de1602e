// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::{
    routing::{delete, get},
    Router,
};

use crate::server::{handlers, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::upsert_transaction),
        )
        .route("/api/transactions/:id", delete(handlers::delete_transaction))
}
