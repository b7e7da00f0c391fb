// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use loki_push::{
    client::LokiClient, config::LokiConfig, entry::LogEntry, error::PushError, labels::LabelSet,
};

const DEFAULT_HOST: &str = "somehost";
const SOURCE_LABEL: &str = "Name-of-your-source";
const JOB_LABEL: &str = "name-of-your-job";

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match LokiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading Loki configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = format!("h2=off,hyper=off,rustls=off,{}", config.log_level);

    let filter = match EnvFilter::try_new(env_filter) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Could not parse log level in configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    debug!("Logging subsystem enabled");

    let host = env::var("LOKI_DEMO_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

    match run(&config, &host).await {
        Ok(()) => {
            info!("Pushed demo entries to {}", config.push_url());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error pushing demo entries to Loki: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &LokiConfig, host: &str) -> Result<(), PushError> {
    let client = LokiClient::new(config)?;
    let labels = LabelSet::from([("source", SOURCE_LABEL), ("job", JOB_LABEL), ("host", host)]);

    let msg = format!("On server {host} detected error");
    client
        .send(&format!("[WARN] {msg}"), &labels, None, None)
        .await?;

    let entries = vec![
        LogEntry::new(format!("[INFO] {host} check started"), labels.clone()),
        LogEntry::new(
            format!("[INFO] {host} check finished"),
            labels.clone().with("stage", "post"),
        ),
        LogEntry::new(format!("[WARN] {msg}"), labels),
    ];
    client.send_batch(&entries, true).await
}
