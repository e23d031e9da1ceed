// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Serialization of enriched records into Logstash wire payloads.

use crate::errors::EncodeError;
use crate::record::EnrichedRecord;

/// How consecutive payloads are delimited on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Bare JSON. Each payload travels as its own datagram.
    Unframed,
    /// JSON followed by a single `\n`, for ordered byte streams.
    Newline,
}

/// Encodes `record` as one JSON object, framed according to `framing`.
pub fn encode(record: &EnrichedRecord, framing: Framing) -> Result<Vec<u8>, EncodeError> {
    let mut payload = serde_json::to_vec(record)?;
    if framing == Framing::Newline {
        payload.push(b'\n');
    }
    Ok(payload)
}
