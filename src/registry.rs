// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory strip registry.

use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::types::Strip;

/// The ordered list of strips held by the running process.
///
/// Writes replace the whole list; there is no per-strip update. Reads hand
/// out a copy, so callers never observe a later replacement through a value
/// they already hold.
///
/// # Examples
///
/// ```
/// use ledstrip_store::registry::StripRegistry;
/// use ledstrip_store::types::Strip;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = StripRegistry::new(vec![Strip::with_defaults(0)]);
/// registry.replace_all(Vec::new()).await;
/// assert!(registry.read_all().await.is_empty());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct StripRegistry {
    strips: Arc<RwLock<Vec<Strip>>>,
}

impl StripRegistry {
    /// Creates a registry holding `initial`.
    #[must_use]
    pub fn new(initial: Vec<Strip>) -> Self {
        Self {
            strips: Arc::new(RwLock::new(initial)),
        }
    }

    /// Creates a registry holding the three seeded strips.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(crate::seed::seed_strips())
    }

    /// Discards the current strips and stores `strips` in their place.
    pub async fn replace_all(&self, strips: Vec<Strip>) {
        self.lock_for_update().await.replace_all(strips);
    }

    /// Returns a copy of the current strips.
    pub async fn read_all(&self) -> Vec<Strip> {
        self.strips.read().await.clone()
    }

    /// Returns the number of strips.
    pub async fn len(&self) -> usize {
        self.strips.read().await.len()
    }

    /// Returns whether the registry holds no strips.
    pub async fn is_empty(&self) -> bool {
        self.strips.read().await.is_empty()
    }

    /// Takes the write lock for a multi-step update.
    ///
    /// Readers wait until the returned guard is dropped, so everything done
    /// while holding it (including the disk write) happens before any later
    /// request sees the registry. The guard is owned and can be moved into
    /// a blocking task, so it outlives the request that took it.
    pub async fn lock_for_update(&self) -> RegistryGuard {
        RegistryGuard {
            strips: Arc::clone(&self.strips).write_owned().await,
        }
    }
}

/// Exclusive access to the registry, obtained from
/// [`StripRegistry::lock_for_update`].
#[derive(Debug)]
pub struct RegistryGuard {
    strips: OwnedRwLockWriteGuard<Vec<Strip>>,
}

impl RegistryGuard {
    /// Replaces the strips.
    pub fn replace_all(&mut self, strips: Vec<Strip>) {
        *self.strips = strips;
    }

    /// Returns the strips as currently stored.
    #[must_use]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn seeded_registry_holds_three_strips() {
        let registry = StripRegistry::seeded();
        assert_eq!(registry.len().await, 3);
    }

    #[tokio::test]
    async fn replace_is_not_a_merge() {
        let registry = StripRegistry::seeded();
        registry.replace_all(vec![Strip::with_defaults(7)]).await;

        let strips = registry.read_all().await;
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].id, 7);
    }

    #[tokio::test]
    async fn replace_keeps_duplicates_and_order() {
        let registry = StripRegistry::default();
        let strips = vec![
            Strip::with_defaults(5),
            Strip::with_defaults(5),
            Strip::with_defaults(1),
        ];
        registry.replace_all(strips.clone()).await;
        assert_eq!(registry.read_all().await, strips);
    }

    #[tokio::test]
    async fn read_returns_a_copy() {
        let registry = StripRegistry::seeded();
        let mut copy = registry.read_all().await;
        copy.clear();
        assert!(!registry.is_empty().await);
    }

    #[tokio::test]
    async fn readers_wait_for_update_guard() {
        let registry = Arc::new(StripRegistry::seeded());
        let mut guard = registry.lock_for_update().await;

        let reader = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.read_all().await })
        };

        guard.replace_all(Vec::new());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!reader.is_finished());
        drop(guard);

        assert!(reader.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn guard_outlives_the_task_that_took_it() {
        let registry = Arc::new(StripRegistry::seeded());
        let guard = registry.lock_for_update().await;

        let holder = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            drop(guard);
        });

        assert_eq!(registry.len().await, 3);
        holder.join().unwrap();
    }
}
