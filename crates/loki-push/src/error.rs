// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;

/// Errors that can occur when building or pushing a Loki payload
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by, or on the way to, the push endpoint.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Loki responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to send request to Loki: {0}")]
    Request(#[from] reqwest::Error),
}

impl PushError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Status code returned by Loki, if the push got far enough to receive one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(TransportError::Status { status, .. }) => Some(*status),
            Self::Transport(TransportError::Request(err)) => err.status(),
            _ => None,
        }
    }
}
