// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Route URIs naming an adapter, an optional transport and a destination address.
//!
//! ```text
//! logstash://logstash.local:5000
//! logstash+tcp://logstash.local:5000
//! logstash-tcp://logstash.local:5000
//! ```

use std::str::FromStr;

use crate::errors::SetupError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Name of the adapter factory to build, e.g. `logstash`.
    pub adapter: String,
    /// Transport named after `+` in the scheme, overriding the adapter's default.
    pub transport: Option<String>,
    /// `host:port` of the collector.
    pub address: String,
}

impl Route {
    pub fn new(adapter: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            transport: None,
            address: address.into(),
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// The transport this route asks for, falling back to the adapter's `default`.
    pub fn adapter_transport<'a>(&'a self, default: &'a str) -> &'a str {
        self.transport.as_deref().unwrap_or(default)
    }

    pub fn parse(uri: &str) -> Result<Self, SetupError> {
        let invalid = |reason: &str| SetupError::InvalidRoute {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = uri
            .trim()
            .split_once("://")
            .ok_or_else(|| invalid("missing scheme"))?;
        let (adapter, transport) = match scheme.split_once('+') {
            Some((adapter, transport)) => (adapter, Some(transport)),
            None => (scheme, None),
        };
        if adapter.is_empty() {
            return Err(invalid("empty adapter name"));
        }
        if transport.is_some_and(str::is_empty) {
            return Err(invalid("empty transport name"));
        }

        if rest.contains('?') {
            return Err(invalid("route options are not supported"));
        }
        let address = rest.trim_end_matches('/');
        if address.is_empty() {
            return Err(invalid("missing address"));
        }

        Ok(Self {
            adapter: adapter.to_string(),
            transport: transport.map(str::to_string),
            address: address.to_string(),
        })
    }
}

impl FromStr for Route {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
