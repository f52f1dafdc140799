// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirroring the registry to disk.
//!
//! A sink receives the full strip list after every replacement. The file it
//! writes is a one-way mirror: nothing in this crate reads it back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::PersistenceError;
use crate::types::Strip;

/// Default file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Destination for the strip list after each replacement.
///
/// Sinks are synchronous. The store runs them on the blocking thread pool
/// and waits for the result before answering the request.
pub trait PersistenceSink: Send + Sync + 'static {
    /// Writes the complete strip list, replacing whatever was written before.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the list could not be written.
    fn persist(&self, strips: &[Strip]) -> Result<(), PersistenceError>;

    /// Short description used in log output.
    fn describe(&self) -> String;
}

/// Writes the strip list as pretty-printed JSON with 4-space indentation.
///
/// The file is truncated and rewritten in place. A crash part way through
/// leaves a truncated file.
///
/// # Examples
///
/// ```no_run
/// use ledstrip_store::persistence::{JsonFileSink, PersistenceSink};
///
/// let sink = JsonFileSink::new("data.json");
/// sink.persist(&ledstrip_store::seed::seed_strips()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileSink {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl PersistenceSink for JsonFileSink {
    fn persist(&self, strips: &[Strip]) -> Result<(), PersistenceError> {
        let io_error = |source: std::io::Error| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        write_pretty(&mut writer, strips).map_err(|err| match err {
            PersistenceError::Serialize(err) if err.is_io() => io_error(err.into()),
            other => other,
        })?;
        writer.flush().map_err(io_error)?;

        tracing::debug!(path = %self.path.display(), count = strips.len(), "Wrote strips to disk");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps every persisted snapshot in memory.
///
/// Used when the server runs without a data file, and by tests that need to
/// see exactly what was handed to the sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    snapshots: Mutex<Vec<Vec<Strip>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent snapshot, if any.
    #[must_use]
    pub fn last(&self) -> Option<Vec<Strip>> {
        self.snapshots.lock().last().cloned()
    }

    /// Returns how many times the sink was written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.snapshots.lock().len()
    }
}

impl PersistenceSink for MemorySink {
    fn persist(&self, strips: &[Strip]) -> Result<(), PersistenceError> {
        self.snapshots.lock().push(strips.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Serializes `strips` with 4-space indentation.
///
/// # Errors
///
/// Returns [`PersistenceError::Serialize`] if serialization or the
/// underlying write fails.
pub fn write_pretty<W: Write>(writer: W, strips: &[Strip]) -> Result<(), PersistenceError> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    strips.serialize(&mut serializer)?;
    Ok(())
}

/// Returns the document [`JsonFileSink`] would write for `strips`.
///
/// # Errors
///
/// Returns [`PersistenceError::Serialize`] if serialization fails.
pub fn to_pretty_string(strips: &[Strip]) -> Result<String, PersistenceError> {
    let mut buffer = Vec::new();
    write_pretty(&mut buffer, strips)?;
    String::from_utf8(buffer)
        .map_err(|err| PersistenceError::Serialize(serde::ser::Error::custom(err)))
}
