// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response bodies and the mapping from errors to HTTP statuses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Error};
use crate::types::Strip;

/// Body returned by `POST /api/ledstrips/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Always `"ok"`.
    pub status: String,
    /// The strips now held by the registry.
    pub updated: Vec<Strip>,
}

impl UpdateResponse {
    /// Wraps the accepted strips.
    #[must_use]
    pub fn ok(updated: Vec<Strip>) -> Self {
        Self {
            status: "ok".to_string(),
            updated,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error category.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

/// An [`Error`] on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// Returns the status code and category for the wrapped error.
    #[must_use]
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            Error::Decode(DecodeError::Syntax(_)) => (StatusCode::BAD_REQUEST, "JSON Parsing Error"),
            Error::Decode(DecodeError::Data(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Decode Error")
            }
            Error::Validation(_) | Error::Value(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Validation Error")
            }
            Error::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Persistence Error"),
            Error::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
        }
    }
}

impl<E: Into<Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();
        let body = ErrorBody {
            error: error.to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
