// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Adapter factories and the registry the composition root keeps them in.
//!
//! Nothing registers itself: the hosting binary calls each flavour's `init` and inserts the
//! returned factory into a registry it owns.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::adapter::LogstashAdapter;
use crate::errors::SetupError;
use crate::route::Route;

pub type AdapterFuture = Pin<Box<dyn Future<Output = Result<LogstashAdapter, SetupError>> + Send>>;

/// Builds a connected adapter for a route.
pub type AdapterFactory = fn(Route) -> AdapterFuture;

/// UDP flavour: best-effort delivery, unframed datagrams, no `appenv`.
pub mod logstash {
    use super::{AdapterFactory, AdapterFuture};
    use crate::adapter::{AdapterOptions, LogstashAdapter};
    use crate::route::Route;

    pub const NAME: &str = "logstash";

    #[must_use]
    pub fn init() -> (&'static str, AdapterFactory) {
        (NAME, new_adapter)
    }

    fn new_adapter(route: Route) -> AdapterFuture {
        Box::pin(async move { LogstashAdapter::connect(&route, AdapterOptions::best_effort()).await })
    }
}

/// TCP flavour: fail-fast delivery, newline framed, with `appenv`.
pub mod logstash_tcp {
    use super::{AdapterFactory, AdapterFuture};
    use crate::adapter::{AdapterOptions, LogstashAdapter};
    use crate::route::Route;

    pub const NAME: &str = "logstash-tcp";

    #[must_use]
    pub fn init() -> (&'static str, AdapterFactory) {
        (NAME, new_adapter)
    }

    fn new_adapter(route: Route) -> AdapterFuture {
        Box::pin(async move { LogstashAdapter::connect(&route, AdapterOptions::fail_fast()).await })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    factories: HashMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding both Logstash flavours.
    #[must_use]
    pub fn with_logstash() -> Self {
        let mut registry = Self::new();
        registry.register(logstash::init());
        registry.register(logstash_tcp::init());
        registry
    }

    pub fn register(&mut self, (name, factory): (&str, AdapterFactory)) {
        debug!("registering adapter factory {name}");
        self.factories.insert(name.to_string(), factory);
    }

    pub fn lookup(&self, name: &str) -> Result<AdapterFactory, SetupError> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| SetupError::UnknownAdapter(name.to_string()))
    }

    /// Looks up the route's adapter and builds it. Errors go back to the caller untouched.
    pub async fn build(&self, route: Route) -> Result<LogstashAdapter, SetupError> {
        let factory = self.lookup(&route.adapter)?;
        factory(route).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterOptions;
    use tokio::net::UdpSocket;

    #[test]
    fn test_lookup_unknown_adapter() {
        let registry = AdapterRegistry::with_logstash();
        assert!(registry.lookup(logstash::NAME).is_ok());
        assert!(registry.lookup(logstash_tcp::NAME).is_ok());
        assert!(matches!(
            registry.lookup("syslog"),
            Err(SetupError::UnknownAdapter(name)) if name == "syslog"
        ));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        assert!(AdapterRegistry::new().lookup(logstash::NAME).is_err());
    }

    #[tokio::test]
    async fn test_build_udp_flavour() {
        let collector = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let address = collector.local_addr().unwrap().to_string();

        let adapter = AdapterRegistry::with_logstash()
            .build(Route::new(logstash::NAME, address))
            .await
            .unwrap();
        assert_eq!(adapter.options(), AdapterOptions::best_effort());
    }

    #[tokio::test]
    async fn test_build_rejects_unknown_transport() {
        let route = Route::new(logstash::NAME, "127.0.0.1:5000").with_transport("sctp");
        let result = AdapterRegistry::with_logstash().build(route).await;
        assert!(matches!(result, Err(SetupError::UnknownTransport(name)) if name == "sctp"));
    }
}
