// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The per-event transform-and-transmit loop.
//!
//! ```text
//!   Log router
//!       │
//!       v
//!   ┌─────────────┐
//!   │   Channel   │ (mpsc, bounded)
//!   └──────┬──────┘
//!          │
//!          v
//!   ┌─────────────┐
//!   │  metadata   │ (env markers, Rancher labels)
//!   └──────┬──────┘
//!          │
//!          v
//!   ┌─────────────┐
//!   │   encoder   │ (JSON, optional newline framing)
//!   └──────┬──────┘
//!          │
//!          v
//!   ┌─────────────┐
//!   │ Connection  │ (UDP or TCP, best-effort or fail-fast)
//!   └─────────────┘
//! ```
//!
//! Events are handled strictly one at a time and in arrival order. The loop ends when every
//! sender of the channel has been dropped, or, under [`TransportPolicy::FailFast`], at the
//! first failed write.

use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::encoder::{encode, Framing};
use crate::errors::{EncodeError, FatalWriteError, SetupError, WriteError};
use crate::event::LogEvent;
use crate::metadata;
use crate::record::EnrichedRecord;
use crate::route::Route;
use crate::transport::{dial, Connection, TransportKind, TransportPolicy};

/// Everything that differs between the UDP and TCP flavours of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterOptions {
    pub policy: TransportPolicy,
    pub framing: Framing,
    /// Whether records carry `appenv`, read from `LOGSTASH-APPENV`.
    pub include_app_env: bool,
    /// Transport used when the route does not name one.
    pub default_transport: TransportKind,
}

impl AdapterOptions {
    /// UDP datagrams, no framing, failed writes are dropped.
    #[must_use]
    pub const fn best_effort() -> Self {
        Self {
            policy: TransportPolicy::BestEffort,
            framing: Framing::Unframed,
            include_app_env: false,
            default_transport: TransportKind::Udp,
        }
    }

    /// Newline framed TCP stream with `appenv`; a failed write stops the process.
    #[must_use]
    pub const fn fail_fast() -> Self {
        Self {
            policy: TransportPolicy::FailFast,
            framing: Framing::Newline,
            include_app_env: true,
            default_transport: TransportKind::Tcp,
        }
    }
}

/// Counters reported once the input channel is drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub sent: u64,
    pub encode_failures: u64,
    pub write_failures: u64,
}

/// Streams enriched log events to a single Logstash endpoint.
pub struct LogstashAdapter {
    connection: Box<dyn Connection>,
    options: AdapterOptions,
}

impl LogstashAdapter {
    #[must_use]
    pub fn new(connection: Box<dyn Connection>, options: AdapterOptions) -> Self {
        Self {
            connection,
            options,
        }
    }

    /// Dials the route's collector once and builds an adapter on top of the connection.
    pub async fn connect(route: &Route, options: AdapterOptions) -> Result<Self, SetupError> {
        let default = options.default_transport.to_string();
        let kind: TransportKind = route.adapter_transport(&default).parse()?;
        let connection = dial(kind, &route.address).await?;
        Ok(Self::new(connection, options))
    }

    #[must_use]
    pub fn options(&self) -> AdapterOptions {
        self.options
    }

    /// Enriches one event and encodes it into its wire payload.
    pub fn transform(&self, event: &LogEvent) -> Result<Vec<u8>, EncodeError> {
        let container = &event.container;
        let metadata = metadata::extract(
            &container.env,
            &container.labels,
            self.options.include_app_env,
        );
        let record = EnrichedRecord::build(event, metadata);
        encode(&record, self.options.framing)
    }

    /// Consumes events until the channel closes.
    ///
    /// Under [`TransportPolicy::FailFast`] the first failed write ends the stream with a
    /// [`FatalWriteError`]; remaining events are left unread.
    pub async fn stream(
        mut self,
        mut rx: mpsc::Receiver<LogEvent>,
    ) -> Result<StreamStats, FatalWriteError> {
        let mut stats = StreamStats::default();
        debug!("logstash: stream started with {:?}", self.options.policy);

        while let Some(event) = rx.recv().await {
            let payload = match self.transform(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    error!("logstash: {e}");
                    stats.encode_failures += 1;
                    continue;
                }
            };

            if let Err(e) = self.connection.write(&payload).await {
                let e = WriteError::from(e);
                match self.options.policy {
                    TransportPolicy::BestEffort => {
                        error!("logstash: {e}");
                        stats.write_failures += 1;
                        continue;
                    }
                    TransportPolicy::FailFast => {
                        error!("logstash: fatal: {e}");
                        return Err(FatalWriteError::new(e));
                    }
                }
            }

            trace!("logstash: sent {} bytes", payload.len());
            stats.sent += 1;
        }

        debug!(
            "logstash: stream drained, sent={} encode_failures={} write_failures={}",
            stats.sent, stats.encode_failures, stats.write_failures
        );
        Ok(stats)
    }
}

/// Runs `adapter` to completion, handing process termination to `on_fatal`.
///
/// `on_fatal` receives the exit status to terminate with and is called at most once, only
/// when a fail-fast write fails. Returns the stream counters if the channel drained normally.
pub async fn run_adapter<F>(
    adapter: LogstashAdapter,
    rx: mpsc::Receiver<LogEvent>,
    on_fatal: F,
) -> Option<StreamStats>
where
    F: FnOnce(i32),
{
    match adapter.stream(rx).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            on_fatal(e.exit_code);
            None
        }
    }
}
