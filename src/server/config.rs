// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::persistence::{DEFAULT_DATA_FILE, JsonFileSink, MemorySink, PersistenceSink};
use crate::validation::{AcceptAll, StrictPolicy, ValidationPolicy};

/// Which validation policy the server applies to updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Accept every well-formed update.
    #[default]
    Off,
    /// Apply [`StrictPolicy`].
    Strict,
}

impl ValidationMode {
    /// Builds the policy for this mode.
    #[must_use]
    pub fn policy(self) -> Arc<dyn ValidationPolicy> {
        match self {
            Self::Off => Arc::new(AcceptAll),
            Self::Strict => Arc::new(StrictPolicy),
        }
    }
}

/// Configuration for [`LedStripServer`](super::LedStripServer).
///
/// # Examples
///
/// ```
/// use ledstrip_store::server::{ServerConfig, ValidationMode};
///
/// let config = ServerConfig::default()
///     .with_host("0.0.0.0")
///     .with_port(8000)
///     .with_data_file("/var/lib/ledstrips/data.json")
///     .with_validation(ValidationMode::Strict);
///
/// assert_eq!(config.bind_address().unwrap().port(), 8000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    host: String,
    port: u16,
    data_file: PathBuf,
    persist: bool,
    enable_cors: bool,
    allowed_origins: Vec<String>,
    validation: ValidationMode,
}

impl ServerConfig {
    /// Default bind host.
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// Default bind port.
    pub const DEFAULT_PORT: u16 = 8000;

    /// Sets the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the bind port. Port 0 picks a free port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the file the strips are mirrored to.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Enables or disables writing the data file.
    #[must_use]
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Enables or disables CORS headers.
    #[must_use]
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Sets the origins allowed by CORS. `*` allows any origin.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Sets the validation mode.
    #[must_use]
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Returns the bind host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the bind port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the data file path.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Returns whether updates are written to the data file.
    #[must_use]
    pub fn persist(&self) -> bool {
        self.persist
    }

    /// Returns whether CORS is enabled.
    #[must_use]
    pub fn enable_cors(&self) -> bool {
        self.enable_cors
    }

    /// Returns the allowed CORS origins.
    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Returns the validation mode.
    #[must_use]
    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    /// Parses host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if the host is not an IP address.
    pub fn bind_address(&self) -> Result<SocketAddr, Error> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Server(format!("invalid address {}: {e}", self.host)))
    }

    /// Builds the persistence sink described by this configuration.
    #[must_use]
    pub fn sink(&self) -> Arc<dyn PersistenceSink> {
        if self.persist {
            Arc::new(JsonFileSink::new(&self.data_file))
        } else {
            Arc::new(MemorySink::new())
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            persist: true,
            enable_cors: false,
            allowed_origins: vec!["*".to_string()],
            validation: ValidationMode::Off,
        }
    }
}
