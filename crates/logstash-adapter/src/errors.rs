// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Logstash adapter.

/// Exit status the lifecycle owner uses when a fail-fast adapter loses its connection.
pub const FATAL_WRITE_EXIT_CODE: i32 = 3;

/// Errors raised while constructing an adapter. Returned to whoever builds the adapter;
/// the adapter itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("unable to find adapter: {0}")]
    UnknownAdapter(String),

    #[error("unable to find transport: {0}")]
    UnknownTransport(String),

    #[error("invalid route {uri}: {reason}")]
    InvalidRoute { uri: String, reason: String },

    #[error("failed to dial {address}: {source}")]
    Dial {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A record could not be serialized. The record is dropped and the stream continues.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode record: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// The connection rejected a write.
#[derive(Debug, thiserror::Error)]
#[error("failed to write record: {0}")]
pub struct WriteError(#[from] pub std::io::Error);

/// A write failed under the fail-fast policy. The stream has stopped and the owner of the
/// process lifecycle is expected to terminate with [`FatalWriteError::exit_code`].
#[derive(Debug, thiserror::Error)]
#[error("fatal write failure, no further records will be sent: {source}")]
pub struct FatalWriteError {
    #[source]
    pub source: WriteError,
    pub exit_code: i32,
}

impl FatalWriteError {
    #[must_use]
    pub fn new(source: WriteError) -> Self {
        Self {
            source,
            exit_code: FATAL_WRITE_EXIT_CODE,
        }
    }
}
