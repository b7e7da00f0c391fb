// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Time source used when an entry does not carry its own timestamp.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub trait Clock: Send + Sync {
    /// Current instant in the clock's timezone.
    fn now(&self) -> DateTime<Tz>;

    /// Current instant as nanoseconds since the Unix epoch, in decimal.
    ///
    /// Instants that do not fit in an `i64` of nanoseconds fall back to `"0"`.
    fn now_nanos(&self) -> String {
        let now = self.now();
        match now.timestamp_nanos_opt() {
            Some(nanos) => nanos.to_string(),
            None => {
                warn!("Clock returned {now}, which is out of range for a nanosecond timestamp");
                "0".to_string()
            }
        }
    }
}

/// Wall clock reporting in a configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Tz>);

impl FixedClock {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}
