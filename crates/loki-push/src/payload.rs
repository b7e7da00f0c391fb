// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Push payload construction.
//!
//! Loki's JSON push body looks like:
//!
//! ```json
//! {
//!   "streams": [
//!     {
//!       "stream": {"job": "x"},
//!       "values": [
//!         ["1700000000000000000", "line"],
//!         ["1700000000000000001", "line", "{\"trace_id\":\"abc\"}"]
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! [`PayloadBuilder`] produces that shape from [`LogEntry`] values. It never
//! performs I/O and keeps no state between calls besides its clock.

use crate::clock::Clock;
use crate::entry::{LogEntry, Metadata};
use crate::error::PushError;
use crate::labels::LabelSet;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One line within a stream: `[timestamp, message]` or
/// `[timestamp, message, metadata_json]` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StreamValue {
    timestamp: String,
    message: String,
    metadata: Option<String>,
}

impl StreamValue {
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Metadata as the JSON object string sent to Loki.
    pub fn metadata_json(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Metadata parsed back into a map.
    pub fn metadata(&self) -> Result<Option<Metadata>, PushError> {
        self.metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(PushError::from)
    }
}

impl From<StreamValue> for Vec<String> {
    fn from(value: StreamValue) -> Self {
        let mut parts = vec![value.timestamp, value.message];
        parts.extend(value.metadata);
        parts
    }
}

impl TryFrom<Vec<String>> for StreamValue {
    type Error = String;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        let len = parts.len();
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(timestamp), Some(message), metadata, None) => Ok(StreamValue {
                timestamp,
                message,
                metadata,
            }),
            _ => Err(format!("stream value must have 2 or 3 elements, got {len}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(rename = "stream")]
    pub labels: LabelSet,
    pub values: Vec<StreamValue>,
}

/// Body of a `POST /loki/api/v1/push` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub streams: Vec<Stream>,
}

impl Payload {
    pub fn to_json(&self) -> Result<Vec<u8>, PushError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(json: &[u8]) -> Result<Self, PushError> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Number of log lines across all streams.
    pub fn entry_count(&self) -> usize {
        self.streams.iter().map(|s| s.values.len()).sum()
    }
}

/// Builds push payloads, filling in missing timestamps from `C`.
#[derive(Debug, Clone)]
pub struct PayloadBuilder<C> {
    clock: C,
}

impl<C: Clock> PayloadBuilder<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Formats a single line. Empty metadata is treated as absent.
    pub fn format_entry(
        &self,
        message: &str,
        timestamp: Option<&str>,
        metadata: Option<&Metadata>,
    ) -> Result<StreamValue, PushError> {
        let timestamp = match timestamp {
            Some(ts) => {
                validate_timestamp(ts)?;
                ts.to_string()
            }
            None => self.clock.now_nanos(),
        };
        let metadata = match metadata {
            Some(m) if !m.is_empty() => Some(serde_json::to_string(m)?),
            _ => None,
        };
        Ok(StreamValue {
            timestamp,
            message: message.to_string(),
            metadata,
        })
    }

    /// Builds a payload holding exactly one stream with one line.
    pub fn build_single(
        &self,
        message: &str,
        labels: &LabelSet,
        metadata: Option<&Metadata>,
        timestamp: Option<&str>,
    ) -> Result<Payload, PushError> {
        if labels.is_empty() {
            return Err(PushError::invalid_input(
                "labels must contain at least one label",
            ));
        }
        let value = self.format_entry(message, timestamp, metadata)?;
        Ok(Payload {
            streams: vec![Stream {
                labels: labels.clone(),
                values: vec![value],
            }],
        })
    }

    /// Builds a payload from `entries`.
    ///
    /// Without grouping every entry becomes its own stream, in input order.
    /// With grouping, entries whose label sets are equal share a stream; lines
    /// keep their input order within a stream and streams are emitted in the
    /// order their label set was first seen.
    pub fn build_batch(
        &self,
        entries: &[LogEntry],
        group_by_labels: bool,
    ) -> Result<Payload, PushError> {
        if entries.is_empty() {
            return Err(PushError::invalid_input("entries must not be empty"));
        }

        let mut streams: Vec<Stream> = Vec::new();
        let mut index_by_labels: HashMap<&LabelSet, usize> = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            if entry.labels().is_empty() {
                return Err(PushError::invalid_input(format!(
                    "entry {position} has no labels"
                )));
            }
            let value =
                self.format_entry(entry.message(), entry.timestamp(), entry.metadata())?;

            if !group_by_labels {
                streams.push(Stream {
                    labels: entry.labels().clone(),
                    values: vec![value],
                });
                continue;
            }

            match index_by_labels.get(entry.labels()) {
                Some(&index) => streams[index].values.push(value),
                None => {
                    index_by_labels.insert(entry.labels(), streams.len());
                    streams.push(Stream {
                        labels: entry.labels().clone(),
                        values: vec![value],
                    });
                }
            }
        }

        debug!(
            "Built payload with {} streams from {} entries (grouped: {group_by_labels})",
            streams.len(),
            entries.len()
        );
        Ok(Payload { streams })
    }
}

fn validate_timestamp(timestamp: &str) -> Result<(), PushError> {
    if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PushError::invalid_input(format!(
            "timestamp must be nanoseconds since the Unix epoch in decimal, got {timestamp:?}"
        )));
    }
    Ok(())
}
