// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP client construction for the push endpoint.

use crate::config::LokiConfig;
use crate::constants::TENANT_HEADER;
use crate::error::PushError;
use core::time::Duration;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::error;

/// Builds the reqwest client used for pushes.
///
/// An unparsable proxy URL is logged and the client falls back to a direct
/// connection.
#[must_use]
pub fn get_client(config: &LokiConfig) -> reqwest::Client {
    match build_client(config, true) {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Unable to parse proxy configuration: {}, falling back to direct connection",
                e
            );
            match build_client(config, false) {
                Ok(client) => client,
                Err(inner) => {
                    error!(
                        "Failed to build HTTP client without proxy: {}, using reqwest defaults",
                        inner
                    );
                    reqwest::Client::new()
                }
            }
        }
    }
}

fn build_client(config: &LokiConfig, allow_proxy: bool) -> Result<reqwest::Client, reqwest::Error> {
    let mut client = reqwest::Client::builder()
        .timeout(config.timeout)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(120)));

    if allow_proxy {
        if let Some(https_uri) = &config.https_proxy {
            let proxy = reqwest::Proxy::https(https_uri.clone())?;
            client = client.proxy(proxy);
        }
    }

    client.build()
}

/// Headers sent with every push: JSON content type, plus the tenant header
/// when a tenant is configured.
pub fn push_headers(tenant_id: Option<&str>) -> Result<HeaderMap, PushError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(tenant_id) = tenant_id {
        let value = HeaderValue::from_str(tenant_id).map_err(|_| {
            PushError::InvalidConfig(format!(
                "Tenant '{tenant_id}' is not a valid {TENANT_HEADER} header value"
            ))
        })?;
        headers.insert(TENANT_HEADER, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_headers_without_tenant() {
        let headers = push_headers(None).unwrap();
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
        assert!(!headers.contains_key(TENANT_HEADER));
    }

    #[test]
    fn test_push_headers_with_tenant() {
        let headers = push_headers(Some("team-a")).unwrap();
        assert_eq!(headers.get("X-Scope-OrgID").unwrap(), "team-a");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_push_headers_rejects_invalid_tenant() {
        let err = push_headers(Some("team\na")).unwrap_err();
        assert!(matches!(err, PushError::InvalidConfig(_)));
    }

    #[test]
    fn test_get_client_with_proxy() {
        let config = LokiConfig {
            https_proxy: Some("http://proxy.example.com:8080".to_string()),
            ..Default::default()
        };
        let client = get_client(&config);
        assert!(client.post(config.push_url()).build().is_ok());
    }

    #[test]
    fn test_get_client_falls_back_on_bad_proxy() {
        let config = LokiConfig {
            https_proxy: Some("not a url".to_string()),
            ..Default::default()
        };
        let client = get_client(&config);
        assert!(client.post(config.push_url()).build().is_ok());
    }
}
