// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::event::LogEvent;
use crate::metadata::Metadata;

/// A log line enriched with container and classification fields, in Logstash's JSON schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub message: String,
    #[serde(rename = "docker.name")]
    pub name: String,
    #[serde(rename = "docker.id")]
    pub id: String,
    #[serde(rename = "docker.image")]
    pub image: String,
    #[serde(rename = "docker.hostname")]
    pub hostname: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub tags: String,
    #[serde(rename = "rancherhostid")]
    pub rancher_host_id: String,
    #[serde(rename = "dockerip")]
    pub docker_ip: String,
    #[serde(rename = "rancherip")]
    pub rancher_ip: String,
    /// Only part of the schema for adapters that read `LOGSTASH-APPENV`.
    #[serde(rename = "appenv", default, skip_serializing_if = "Option::is_none")]
    pub app_env: Option<String>,
}

impl EnrichedRecord {
    /// Combines an event with its extracted metadata. Never fails; empty fields are valid.
    #[must_use]
    pub fn build(event: &LogEvent, metadata: Metadata) -> Self {
        let container = &event.container;
        Self {
            message: event.data.clone(),
            name: container.name.clone(),
            id: container.id.clone(),
            image: container.image.clone(),
            hostname: container.hostname.clone(),
            log_type: metadata.log_type,
            tags: metadata.tags,
            rancher_host_id: metadata.rancher_host_id,
            docker_ip: container.ip_address.clone(),
            rancher_ip: metadata.rancher_ip,
            app_env: metadata.app_env,
        }
    }
}
