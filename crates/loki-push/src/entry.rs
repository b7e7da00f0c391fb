// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::PushError;
use crate::labels::LabelSet;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Structured metadata attached to a single log line.
pub type Metadata = BTreeMap<String, String>;

/// A single log line waiting to be pushed.
///
/// Entries are immutable once built; use the `with_*` methods while
/// constructing one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogEntry {
    message: String,
    labels: LabelSet,
    #[serde(default)]
    metadata: Option<Metadata>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, labels: impl Into<LabelSet>) -> Self {
        Self {
            message: message.into(),
            labels: labels.into(),
            metadata: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the timestamp, as nanoseconds since the Unix epoch in decimal.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Parses an entry from its JSON form, e.g.
    /// `{"message": "a", "labels": {"job": "x"}, "timestamp": "1700000000000000000"}`.
    ///
    /// A missing `message` or `labels` field, or a non-string label or
    /// metadata value, is reported as [`PushError::InvalidInput`].
    pub fn from_json(json: &str) -> Result<Self, PushError> {
        serde_json::from_str(json)
            .map_err(|err| PushError::invalid_input(format!("malformed log entry: {err}")))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}
