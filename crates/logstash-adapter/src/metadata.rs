// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Extraction of Logstash classification fields from container environment and labels.
//!
//! Containers opt into classification by declaring environment markers:
//!
//! ```text
//! LOGSTASH-TYPE=nginx
//! LOGSTASH-TAGS=frontend,public
//! LOGSTASH-APPENV=production   (only read when the schema carries `appenv`)
//! ```
//!
//! Keys are matched case-sensitively, values are lower-cased. When a marker is declared more
//! than once the last declaration wins.

use std::collections::HashMap;

pub const TYPE_KEY: &str = "LOGSTASH-TYPE";
pub const TAGS_KEY: &str = "LOGSTASH-TAGS";
pub const APP_ENV_KEY: &str = "LOGSTASH-APPENV";

/// Value of `appenv` when the container does not declare one.
pub const DEFAULT_APP_ENV: &str = "devel";

pub const RANCHER_IP_LABEL: &str = "io.rancher.container.ip";
pub const RANCHER_HOST_ID_LABEL: &str = "io.rancher.service.requested.host.id";

/// Classification and orchestration fields pulled out of one container's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub log_type: String,
    pub tags: String,
    /// `None` when the schema has no `appenv` field.
    pub app_env: Option<String>,
    pub rancher_host_id: String,
    pub rancher_ip: String,
}

/// Scans `env` and `labels` for the recognized markers.
///
/// Entries without an `=` are skipped. Only the first `=` separates key from value, so values
/// may themselves contain `=`. Missing labels leave the matching field empty.
#[must_use]
pub fn extract(env: &[String], labels: &HashMap<String, String>, include_app_env: bool) -> Metadata {
    let mut log_type = String::new();
    let mut tags = String::new();
    let mut app_env = include_app_env.then(|| DEFAULT_APP_ENV.to_string());

    for kv in env {
        let Some((key, value)) = kv.split_once('=') else {
            continue;
        };
        match key {
            TYPE_KEY => log_type = value.to_lowercase(),
            TAGS_KEY => tags = value.to_lowercase(),
            APP_ENV_KEY if include_app_env => app_env = Some(value.to_lowercase()),
            _ => {}
        }
    }

    Metadata {
        log_type,
        tags,
        app_env,
        rancher_host_id: label(labels, RANCHER_HOST_ID_LABEL),
        rancher_ip: label(labels, RANCHER_IP_LABEL),
    }
}

fn label(labels: &HashMap<String, String>, key: &str) -> String {
    labels.get(key).cloned().unwrap_or_default()
}
