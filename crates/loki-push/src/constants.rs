// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Endpoint path, header names and defaults for the Loki push API.

use std::time::Duration;

/// Path of the JSON push endpoint, appended to the configured base URL.
pub const PUSH_PATH: &str = "/loki/api/v1/push";

/// Header carrying the tenant when Loki runs in multi-tenant mode.
pub const TENANT_HEADER: &str = "X-Scope-OrgID";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3100";

/// Deadline applied to every push request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub(crate) const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
