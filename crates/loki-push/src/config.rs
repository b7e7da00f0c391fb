// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT, PUSH_PATH, VALID_LOG_LEVELS,
};
use crate::error::PushError;
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

/// Configuration for pushing to a Loki instance
#[derive(Debug, Clone)]
pub struct LokiConfig {
    /// Base URL of the Loki instance (e.g., http://localhost:3100)
    pub base_url: String,
    /// Tenant sent as `X-Scope-OrgID`, if Loki runs multi-tenant
    pub tenant_id: Option<String>,
    /// Timezone used when stamping entries that carry no timestamp
    pub timezone: Tz,
    /// Deadline for each push request
    pub timeout: Duration,
    /// HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for LokiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: None,
            timezone: Tz::UTC,
            timeout: DEFAULT_TIMEOUT,
            https_proxy: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LokiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, PushError> {
        let defaults = Self::default();

        let base_url = env::var("LOKI_URL").unwrap_or(defaults.base_url);
        let tenant_id = env::var("LOKI_TENANT_ID").ok();
        let timezone = match env::var("LOKI_TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => defaults.timezone,
        };
        let timeout = match env::var("LOKI_TIMEOUT_SECS") {
            Ok(secs) => secs
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    PushError::InvalidConfig(format!(
                        "LOKI_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                    ))
                })?,
            Err(_) => defaults.timeout,
        };
        let https_proxy = env::var("LOKI_PROXY_HTTPS")
            .or_else(|_| env::var("HTTPS_PROXY"))
            .ok();
        let log_level = env::var("LOKI_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or(defaults.log_level);

        let config = Self {
            base_url,
            tenant_id,
            timezone,
            timeout,
            https_proxy,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PushError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(PushError::InvalidConfig(
                "LOKI_URL cannot be empty".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PushError::InvalidConfig(format!(
                "LOKI_URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        if let Some(tenant_id) = &self.tenant_id {
            if tenant_id.trim().is_empty() {
                return Err(PushError::InvalidConfig(
                    "LOKI_TENANT_ID cannot be empty when set".to_string(),
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(PushError::InvalidConfig(
                "Push timeout must be greater than 0".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(PushError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Full URL of the push endpoint.
    pub fn push_url(&self) -> String {
        format!("{}{PUSH_PATH}", self.base_url.trim().trim_end_matches('/'))
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, PushError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| PushError::InvalidConfig(format!("Invalid timezone '{name}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Yekaterinburg;
    use serial_test::serial;

    const ENV_VARS: [&str; 7] = [
        "LOKI_URL",
        "LOKI_TENANT_ID",
        "LOKI_TIMEZONE",
        "LOKI_TIMEOUT_SECS",
        "LOKI_PROXY_HTTPS",
        "HTTPS_PROXY",
        "LOKI_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LokiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.push_url(), "http://localhost:3100/loki/api/v1/push");
    }

    #[test]
    fn test_default_timezone_is_utc() {
        assert_eq!(LokiConfig::default().timezone, Tz::UTC);
        assert_eq!(LokiConfig::default().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_push_url_trims_trailing_slash() {
        let config = LokiConfig {
            base_url: "http://loki:3100/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.push_url(), "http://loki:3100/loki/api/v1/push");
    }

    #[test]
    fn test_validate_empty_base_url() {
        for base_url in ["", "   "] {
            let config = LokiConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let config = LokiConfig {
            base_url: "loki:3100".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_tenant() {
        let config = LokiConfig {
            tenant_id: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = LokiConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_log_levels() {
        for level in VALID_LOG_LEVELS {
            let config = LokiConfig {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Log level '{}' should be valid",
                level
            );
        }

        let config = LokiConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Yekaterinburg").unwrap(), Yekaterinburg);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(PushError::InvalidConfig(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = LokiConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tenant_id, None);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.https_proxy, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("LOKI_URL", "https://logs.example.com");
        env::set_var("LOKI_TENANT_ID", "team-a");
        env::set_var("LOKI_TIMEZONE", "Asia/Yekaterinburg");
        env::set_var("LOKI_TIMEOUT_SECS", "10");
        env::set_var("HTTPS_PROXY", "http://proxy:8080");
        env::set_var("LOKI_LOG_LEVEL", "DEBUG");

        let config = LokiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://logs.example.com");
        assert_eq!(config.tenant_id.as_deref(), Some("team-a"));
        assert_eq!(config.timezone, Yekaterinburg);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.https_proxy.as_deref(), Some("http://proxy:8080"));
        assert_eq!(config.log_level, "debug");

        env::set_var("LOKI_PROXY_HTTPS", "http://loki-proxy:8080");
        let config = LokiConfig::from_env().unwrap();
        assert_eq!(config.https_proxy.as_deref(), Some("http://loki-proxy:8080"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values() {
        clear_env();
        env::set_var("LOKI_TIMEOUT_SECS", "soon");
        assert_eq!(
            LokiConfig::from_env().unwrap_err().to_string(),
            "Invalid configuration: LOKI_TIMEOUT_SECS must be a whole number of seconds, got 'soon'"
        );
        clear_env();

        env::set_var("LOKI_TIMEZONE", "Nowhere/Special");
        assert!(LokiConfig::from_env().is_err());
        clear_env();

        env::set_var("LOKI_URL", "ftp://loki");
        assert!(LokiConfig::from_env().is_err());
        clear_env();
    }
}
