// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Feeds the adapter from newline-delimited JSON log events.

use std::io::ErrorKind;

use logstash_adapter::LogEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tracing::{debug, error};

/// Reads events from `reader` until EOF and queues them in order.
///
/// Blank lines are ignored. Lines that are not valid UTF-8 or not a valid event are logged
/// and skipped. Returns how many events were queued. Stops early if the adapter has gone away
/// or the reader fails. Dropping `tx` on return closes the queue, which lets the adapter drain.
pub async fn forward_lines<R>(mut reader: R, tx: Sender<LogEvent>) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut queued = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("Failed to read log event: {e}");
                break;
            }
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let event: LogEvent = match serde_json::from_slice(&buf) {
            Ok(event) => event,
            Err(e) => {
                error!("Skipping malformed log event: {e}");
                continue;
            }
        };

        if tx.send(event).await.is_err() {
            debug!("Adapter stopped, no longer reading input");
            break;
        }
        queued += 1;
    }

    debug!("Input closed after {queued} events");
    queued
}
