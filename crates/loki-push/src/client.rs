// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sending payloads to Loki.
//!
//! [`LokiClient`] binds a [`LokiConfig`] to a reqwest client and a clock, and
//! exposes single-line and batch sends. A push is a single POST: it is never
//! retried, and any failure is logged and then returned to the caller.

use crate::clock::{Clock, SystemClock};
use crate::config::LokiConfig;
use crate::entry::{LogEntry, Metadata};
use crate::error::{PushError, TransportError};
use crate::http::{get_client, push_headers};
use crate::labels::LabelSet;
use crate::payload::{Payload, PayloadBuilder};
use reqwest::header::HeaderMap;
use std::time::Instant;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct LokiClient<C = SystemClock> {
    client: reqwest::Client,
    push_url: String,
    headers: HeaderMap,
    builder: PayloadBuilder<C>,
}

impl LokiClient<SystemClock> {
    /// Creates a client stamping untimed entries with the wall clock in the
    /// configured timezone.
    pub fn new(config: &LokiConfig) -> Result<Self, PushError> {
        Self::with_clock(config, SystemClock::new(config.timezone))
    }
}

impl<C: Clock> LokiClient<C> {
    pub fn with_clock(config: &LokiConfig, clock: C) -> Result<Self, PushError> {
        config.validate()?;
        Ok(LokiClient {
            client: get_client(config),
            push_url: config.push_url(),
            headers: push_headers(config.tenant_id.as_deref())?,
            builder: PayloadBuilder::new(clock),
        })
    }

    pub fn push_url(&self) -> &str {
        &self.push_url
    }

    pub fn builder(&self) -> &PayloadBuilder<C> {
        &self.builder
    }

    /// Pushes a single line to the stream identified by `labels`.
    pub async fn send(
        &self,
        message: &str,
        labels: &LabelSet,
        metadata: Option<&Metadata>,
        timestamp: Option<&str>,
    ) -> Result<(), PushError> {
        let payload = self
            .builder
            .build_single(message, labels, metadata, timestamp)?;
        self.push(&payload).await
    }

    /// Pushes `entries` in one request, optionally merging entries with equal
    /// label sets into shared streams.
    pub async fn send_batch(
        &self,
        entries: &[LogEntry],
        group_by_labels: bool,
    ) -> Result<(), PushError> {
        let payload = self.builder.build_batch(entries, group_by_labels)?;
        self.push(&payload).await
    }

    /// POSTs an already built payload. Any 2xx response is a success.
    pub async fn push(&self, payload: &Payload) -> Result<(), PushError> {
        let body = payload.to_json()?;
        let n_streams = payload.streams.len();
        let n_entries = payload.entry_count();

        debug!("Pushing {n_entries} entries in {n_streams} streams to {}", self.push_url);

        let time = Instant::now();
        let resp = self
            .client
            .post(&self.push_url)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await;
        let elapsed = time.elapsed();

        match resp {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    debug!(
                        "Pushed {n_entries} entries in {} ms",
                        elapsed.as_millis()
                    );
                    return Ok(());
                }
                let body = match resp.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        debug!("Failed to read response body from Loki: {e:?}");
                        String::new()
                    }
                };
                error!(
                    "{}: Failed to push {} entries to Loki: {:?}",
                    status, n_entries, body
                );
                Err(TransportError::Status { status, body }.into())
            }
            Err(e) => {
                error!(
                    "Failed to push {} entries to Loki after {} ms: {:?}",
                    n_entries,
                    elapsed.as_millis(),
                    e
                );
                Err(TransportError::Request(e).into())
            }
        }
    }
}
