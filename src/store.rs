// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The application context shared by all request handlers.

use std::fmt;
use std::sync::Arc;

use crate::error::{PersistenceError, Result};
use crate::persistence::PersistenceSink;
use crate::registry::StripRegistry;
use crate::types::Strip;
use crate::validation::{AcceptAll, ValidationPolicy};

/// Owns the registry, the disk mirror and the validation policy.
///
/// One store exists per server. Handlers receive it through shared state
/// rather than a global, so tests can build as many as they need.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use ledstrip_store::persistence::MemorySink;
/// use ledstrip_store::store::StripStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> ledstrip_store::Result<()> {
/// let sink = Arc::new(MemorySink::new());
/// let store = StripStore::seeded(sink.clone());
///
/// let updated = store.update(Vec::new()).await?;
/// assert!(updated.is_empty());
/// assert!(store.strips().await.is_empty());
/// assert_eq!(sink.last(), Some(Vec::new()));
/// # Ok(())
/// # }
/// ```
pub struct StripStore {
    registry: StripRegistry,
    sink: Arc<dyn PersistenceSink>,
    policy: Arc<dyn ValidationPolicy>,
}

impl StripStore {
    /// Creates a store holding `initial`, mirroring to `sink` and accepting
    /// every replacement.
    #[must_use]
    pub fn new(initial: Vec<Strip>, sink: Arc<dyn PersistenceSink>) -> Self {
        Self {
            registry: StripRegistry::new(initial),
            sink,
            policy: Arc::new(AcceptAll),
        }
    }

    /// Creates a store holding the seeded strips.
    #[must_use]
    pub fn seeded(sink: Arc<dyn PersistenceSink>) -> Self {
        Self::new(crate::seed::seed_strips(), sink)
    }

    /// Replaces the validation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn ValidationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a copy of the current strips. Never touches the disk.
    pub async fn strips(&self) -> Vec<Strip> {
        self.registry.read_all().await
    }

    /// Replaces every strip and mirrors the result to the sink.
    ///
    /// The registry stays locked until the sink returns, so no other request
    /// can observe or modify it in between. This holds even if the returned
    /// future is dropped part way through the write. If the sink fails the registry
    /// keeps the new strips; the disk mirror is then stale until the next
    /// successful update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the policy
    /// rejects the list (the registry is left untouched), or
    /// [`Error::Persistence`](crate::Error::Persistence) if the sink fails.
    pub async fn update(&self, strips: Vec<Strip>) -> Result<Vec<Strip>> {
        if let Err(err) = self.policy.validate(&strips) {
            tracing::warn!(error = %err, "Rejected strip update");
            return Err(err.into());
        }

        let mut guard = self.registry.lock_for_update().await;
        guard.replace_all(strips);
        let snapshot = guard.strips().to_vec();

        tracing::info!(count = snapshot.len(), "Replaced strip registry");
        tracing::info!(strips = ?snapshot, "New data");

        // The guard moves into the blocking task: if this future is dropped
        // mid-write, the registry stays locked until the file is written.
        let sink = Arc::clone(&self.sink);
        let write = tokio::task::spawn_blocking(move || {
            let result = sink.persist(guard.strips());
            drop(guard);
            if let Err(err) = &result {
                tracing::error!(
                    sink = %sink.describe(),
                    error = %err,
                    "Failed to persist strips; in-memory state already replaced"
                );
            }
            result
        });
        write
            .await
            .map_err(|err| PersistenceError::Task(err.to_string()))??;

        Ok(snapshot)
    }

    /// Returns the description of the sink in use.
    #[must_use]
    pub fn sink_description(&self) -> String {
        self.sink.describe()
    }
}

impl fmt::Debug for StripStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripStore")
            .field("registry", &self.registry)
            .field("sink", &self.sink.describe())
            .finish_non_exhaustive()
    }
}
