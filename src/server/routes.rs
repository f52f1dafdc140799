// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Route table and request handlers.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};

use super::response::{ApiError, UpdateResponse};
use crate::store::StripStore;
use crate::types::{Strip, decode_strips};

/// Path of the read endpoint.
pub const STRIPS_PATH: &str = "/api/ledstrips";
/// Path of the replace endpoint.
pub const UPDATE_PATH: &str = "/api/ledstrips/update";

/// Builds the router over `store`, without any middleware.
pub fn router(store: Arc<StripStore>) -> Router {
    Router::new()
        .route(STRIPS_PATH, get(list_strips))
        .route(UPDATE_PATH, post(update_strips))
        .with_state(store)
}

async fn list_strips(State(store): State<Arc<StripStore>>) -> Json<Vec<Strip>> {
    Json(store.strips().await)
}

// The body is decoded by hand so malformed JSON and wrong shapes get
// distinct statuses regardless of the request's content type.
async fn update_strips(
    State(store): State<Arc<StripStore>>,
    body: Bytes,
) -> Result<Json<UpdateResponse>, ApiError> {
    let strips = decode_strips(&body).inspect_err(|err| {
        tracing::warn!(error = %err, "Rejected update body");
    })?;
    let updated = store.update(strips).await?;
    Ok(Json(UpdateResponse::ok(updated)))
}
