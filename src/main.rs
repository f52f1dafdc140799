// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ledstrip-server` binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ledstrip_store::server::{LedStripServer, ServerConfig, ValidationMode};

/// LED-strip configuration server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = ServerConfig::DEFAULT_HOST)]
    host: String,

    /// Port to bind (0 picks a free port)
    #[arg(short, long, default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// File every update is mirrored to
    #[arg(short = 'd', long, value_name = "FILE", default_value = ledstrip_store::persistence::DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Keep updates in memory only
    #[arg(long)]
    no_persist: bool,

    /// Reject inconsistent updates (duplicate ids, dangling references, bad colors)
    #[arg(long)]
    strict: bool,

    /// Send CORS headers allowing any origin
    #[arg(long)]
    cors: bool,

    /// Increase logging verbosity (default: info, -v: debug, -vv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl Args {
    fn config(&self) -> ServerConfig {
        let validation = if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Off
        };
        ServerConfig::default()
            .with_host(self.host.clone())
            .with_port(self.port)
            .with_data_file(self.data_file.clone())
            .with_persistence(!self.no_persist)
            .with_cors(self.cors)
            .with_validation(validation)
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity);

    let config = args.config();
    LedStripServer::new(config)
        .run()
        .await
        .context("LED strip server failed")?;
    Ok(())
}
