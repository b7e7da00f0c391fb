// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Client for Grafana Loki's JSON push API.
//!
//! ```rust,no_run
//! use loki_push::{client::LokiClient, config::LokiConfig, entry::LogEntry, labels::LabelSet};
//!
//! # async fn run() -> Result<(), loki_push::error::PushError> {
//! let client = LokiClient::new(&LokiConfig::from_env()?)?;
//! let labels = LabelSet::from([("job", "backup")]);
//! client.send("backup finished", &labels, None, None).await?;
//!
//! let entries = vec![
//!     LogEntry::new("disk 91% full", [("job", "backup"), ("host", "db1")]),
//!     LogEntry::new("disk 93% full", [("host", "db1"), ("job", "backup")]),
//! ];
//! client.send_batch(&entries, true).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod clock;
pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod http;
pub mod labels;
pub mod payload;
