// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Logstash adapter: enriches container log events with container and Rancher metadata,
//! serializes them to Logstash JSON and streams them over a single UDP or TCP connection.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod adapter;
pub mod encoder;
pub mod errors;
pub mod event;
pub mod metadata;
pub mod record;
pub mod registry;
pub mod route;
pub mod transport;

pub use adapter::{run_adapter, AdapterOptions, LogstashAdapter, StreamStats};
pub use errors::{EncodeError, FatalWriteError, SetupError, WriteError, FATAL_WRITE_EXIT_CODE};
pub use event::LogEvent;
pub use record::EnrichedRecord;
pub use registry::{AdapterFactory, AdapterRegistry};
pub use route::Route;
