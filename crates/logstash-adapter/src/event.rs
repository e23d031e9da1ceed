// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One container log line as delivered by the log router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEvent {
    /// Raw log line.
    pub data: String,
    pub container: Container,
}

/// Identity and configuration of the container that produced a log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    pub name: String,
    pub id: String,
    pub image: String,
    pub hostname: String,
    /// Address assigned to the container on its network.
    pub ip_address: String,
    /// Environment assignments in `KEY=VALUE` form, in declaration order.
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
}

impl LogEvent {
    pub fn new(data: impl Into<String>, container: Container) -> Self {
        Self {
            data: data.into(),
            container,
        }
    }
}
