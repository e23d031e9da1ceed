// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Connections to the collector and the policies applied when writing to them fails.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};
use tracing::debug;

use crate::errors::SetupError;

/// Transports a route can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Udp,
    Tcp,
}

impl FromStr for TransportKind {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(Self::Udp),
            "tcp" => Ok(Self::Tcp),
            _ => Err(SetupError::UnknownTransport(s.to_string())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => write!(f, "udp"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// What the stream loop does when the connection rejects a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPolicy {
    /// Log, drop the record, keep the connection and move on.
    BestEffort,
    /// Log and stop the stream; the process is expected to exit.
    FailFast,
}

/// An open channel to one collector. Owned by exactly one adapter.
#[async_trait]
pub trait Connection: Send {
    /// Writes one payload. Datagram connections send it as a single datagram.
    async fn write(&mut self, payload: &[u8]) -> std::io::Result<()>;
}

#[async_trait]
impl Connection for UdpSocket {
    async fn write(&mut self, payload: &[u8]) -> std::io::Result<()> {
        let sent = self.send(payload).await?;
        if sent != payload.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("short datagram write: {sent} of {} bytes", payload.len()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Connection for TcpStream {
    async fn write(&mut self, payload: &[u8]) -> std::io::Result<()> {
        self.write_all(payload).await
    }
}

/// Dials `address` once over `kind`. No retries are attempted.
pub async fn dial(kind: TransportKind, address: &str) -> Result<Box<dyn Connection>, SetupError> {
    let dial_error = |source: std::io::Error| SetupError::Dial {
        address: address.to_string(),
        source,
    };

    let connection: Box<dyn Connection> = match kind {
        TransportKind::Udp => {
            let target = tokio::net::lookup_host(address)
                .await
                .map_err(dial_error)?
                .next()
                .ok_or_else(|| {
                    dial_error(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "address resolved to nothing",
                    ))
                })?;
            let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
            let socket = UdpSocket::bind(local).await.map_err(dial_error)?;
            socket.connect(target).await.map_err(dial_error)?;
            Box::new(socket)
        }
        TransportKind::Tcp => Box::new(TcpStream::connect(address).await.map_err(dial_error)?),
    };

    debug!("logstash: dialed {kind}://{address}");
    Ok(connection)
}
