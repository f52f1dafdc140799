// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ledstrip_store` - configuration store and HTTP API for LED-strip
//! controllers.
//!
//! The crate keeps an ordered list of LED strips in memory, each with its
//! GPIO pin, LED count, power flag and a set of animation presets. A web
//! front-end reads the list and replaces it wholesale; every replacement is
//! mirrored to a JSON file on disk.
//!
//! # Layers
//!
//! - [`types`]: the strip and animation records plus validated color values
//! - [`seed`]: the preset animations and the three strips present at startup
//! - [`registry`]: the in-memory list behind an async lock
//! - [`persistence`]: sinks that mirror the list after each replacement
//! - [`validation`]: optional checks applied before a replacement is accepted
//! - [`store`]: ties the three together behind `strips()` / `update()`
//! - `server` (feature `server`, on by default): the axum HTTP API
//!
//! # Quick Start
//!
//! ```no_run
//! use ledstrip_store::server::{LedStripServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> ledstrip_store::Result<()> {
//!     let config = ServerConfig::default()
//!         .with_host("0.0.0.0")
//!         .with_data_file("data.json");
//!
//!     LedStripServer::new(config).run().await
//! }
//! ```
//!
//! # Using the store directly
//!
//! ```
//! use std::sync::Arc;
//!
//! use ledstrip_store::persistence::MemorySink;
//! use ledstrip_store::{Strip, StripStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ledstrip_store::Result<()> {
//! let store = StripStore::seeded(Arc::new(MemorySink::new()));
//! assert_eq!(store.strips().await.len(), 3);
//!
//! store.update(vec![Strip::with_defaults(0)]).await?;
//! assert_eq!(store.strips().await[0].name, "New LedStrip (0)");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod persistence;
pub mod registry;
pub mod seed;
#[cfg(feature = "server")]
pub mod server;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{DecodeError, Error, PersistenceError, Result, ValidationError, ValueError};
pub use persistence::{JsonFileSink, MemorySink, PersistenceSink};
pub use registry::StripRegistry;
pub use store::StripStore;
pub use types::{
    Animation, AnimationCategory, AnimationKind, GradientStop, RawAnimation, Rgb, RgbColor,
    Strip, decode_strips,
};
pub use validation::{AcceptAll, StrictPolicy, ValidationPolicy};
