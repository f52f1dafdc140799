// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the LED-strip store.
//!
//! The hierarchy mirrors the stages a replacement goes through: decoding the
//! request body, running the validation policy, and persisting the new state
//! to disk. Value errors come from the constrained color types.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be decoded into strips.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The validation policy rejected the new state.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The new state could not be written to disk.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A constrained value was out of range.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A color string is not a `#RRGGBB` hex color.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// Errors raised while decoding a list of strips from JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not syntactically valid JSON (or ends early).
    #[error("malformed JSON: {0}")]
    Syntax(serde_json::Error),

    /// The body is valid JSON but does not have the shape of a strip list.
    #[error("invalid strip data: {0}")]
    Data(serde_json::Error),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => Self::Data(err),
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax(err),
        }
    }
}

/// Errors related to writing the strip list to disk.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The target file could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The strips could not be serialized.
    #[error("failed to serialize strips: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The blocking write task panicked or was cancelled.
    #[error("persistence task failed: {0}")]
    Task(String),
}

/// Rejections produced by [`StrictPolicy`](crate::validation::StrictPolicy).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Two strips share the same id.
    #[error("duplicate strip id {0}")]
    DuplicateStripId(i64),

    /// A strip declares zero or a negative number of LEDs.
    #[error("strip {strip} has invalid LED count {count}")]
    InvalidLedCount {
        /// The offending strip.
        strip: i64,
        /// The declared LED count.
        count: i32,
    },

    /// Two animations on one strip share the same id.
    #[error("strip {strip} lists animation {animation} more than once")]
    DuplicateAnimationId {
        /// The offending strip.
        strip: i64,
        /// The repeated animation id.
        animation: i64,
    },

    /// The active animation is not among the strip's animations.
    #[error("strip {strip} selects animation {animation} which it does not list")]
    DanglingAnimation {
        /// The offending strip.
        strip: i64,
        /// The selected animation id.
        animation: i64,
    },

    /// An animation id is not one of the known kinds.
    #[error("strip {strip} has unknown animation kind {animation}")]
    UnknownAnimation {
        /// The offending strip.
        strip: i64,
        /// The unrecognized discriminant.
        animation: i64,
    },

    /// An animation with a known id whose fields do not fit that kind.
    #[error("strip {strip}, animation {animation}: {reason}")]
    MalformedAnimation {
        /// The offending strip.
        strip: i64,
        /// The animation id.
        animation: i64,
        /// Why the fields do not fit.
        reason: String,
    },

    /// A color, position or channel value is out of its conventional range.
    #[error("strip {strip}, animation {animation}: {source}")]
    InvalidValue {
        /// The offending strip.
        strip: i64,
        /// The animation holding the value.
        animation: i64,
        /// What was wrong with the value.
        #[source]
        source: ValueError,
    },

    /// Gradient stop positions decrease along the gradient.
    #[error("strip {strip}, animation {animation}: gradient positions are not ordered")]
    UnorderedGradient {
        /// The offending strip.
        strip: i64,
        /// The animation holding the gradient.
        animation: i64,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
