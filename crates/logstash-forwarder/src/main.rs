// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

mod config;
mod input;

use std::{env, process};

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use logstash_adapter::{run_adapter, AdapterRegistry};

use crate::config::ForwarderConfig;

/// Exit status for configuration and connection failures at startup.
const STARTUP_FAILURE_EXIT_CODE: i32 = 1;

#[tokio::main]
pub async fn main() {
    let log_level = config::log_level(env::var("LOGSTASH_LOG_LEVEL").ok());
    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(log_level).expect("could not parse log level in configuration"),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let config = match ForwarderConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Error reading forwarder configuration: {e}");
            process::exit(STARTUP_FAILURE_EXIT_CODE);
        }
    };

    let registry = AdapterRegistry::with_logstash();

    let route = config.route.clone();
    let adapter = match registry.build(config.route).await {
        Ok(adapter) => adapter,
        Err(e) => {
            error!("Error starting {} adapter: {e}", route.adapter);
            process::exit(STARTUP_FAILURE_EXIT_CODE);
        }
    };
    info!(
        "{}: forwarding to {} over {:?} delivery",
        route.adapter,
        route.address,
        adapter.options().policy
    );

    let (tx, rx) = mpsc::channel(config.queue_capacity);
    tokio::spawn(input::forward_lines(BufReader::new(tokio::io::stdin()), tx));

    let stats = run_adapter(adapter, rx, |code| {
        error!("{}: connection lost, exiting with status {code}", route.adapter);
        process::exit(code);
    })
    .await;

    if let Some(stats) = stats {
        info!(
            "{}: input drained, sent {} records ({} encode failures, {} write failures)",
            route.adapter, stats.sent, stats.encode_failures, stats.write_failures
        );
    }
}
