// file: src/utils/telemetry.rs
// description: health reporting and operation timing
// reference: operational status for the index collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Ordered by severity, so the worst check decides the overall status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn icon(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Degraded => "⚠",
            HealthStatus::Unhealthy => "✗",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        };
        f.write_str(label)
    }
}

/// The parts of the search index a `verify` run looks at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IndexComponent {
    Connection,
    Schema,
}

impl IndexComponent {
    fn label(self) -> &'static str {
        match self {
            IndexComponent::Connection => "database connection",
            IndexComponent::Schema => "pgroonga schema",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub component: IndexComponent,
    pub status: HealthStatus,
    pub detail: Option<String>,
    pub latency_ms: u64,
}

impl HealthCheck {
    fn with_status(
        component: IndexComponent,
        status: HealthStatus,
        detail: Option<String>,
        latency: Duration,
    ) -> Self {
        Self {
            component,
            status,
            detail,
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn healthy(component: IndexComponent, latency: Duration) -> Self {
        Self::with_status(component, HealthStatus::Healthy, None, latency)
    }

    pub fn degraded(component: IndexComponent, detail: impl Into<String>, latency: Duration) -> Self {
        Self::with_status(component, HealthStatus::Degraded, Some(detail.into()), latency)
    }

    pub fn unhealthy(component: IndexComponent, detail: impl Into<String>, latency: Duration) -> Self {
        Self::with_status(component, HealthStatus::Unhealthy, Some(detail.into()), latency)
    }
}

/// Outcome of `verify` against one database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Connection target with credentials removed
    pub target: String,
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub checked_at: DateTime<Utc>,
    pub version: String,
}

impl HealthReport {
    pub fn new(dsn: &str, checks: Vec<HealthCheck>) -> Self {
        let overall_status = checks
            .iter()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            target: redact_dsn(dsn),
            overall_status,
            checks,
            checked_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Searches can still run against a degraded index; they cannot
    /// against an unreachable one.
    pub fn is_searchable(&self) -> bool {
        self.overall_status != HealthStatus::Unhealthy
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "{} {} is {}\n  checked {} by disclosure_search {}\n\n",
            self.overall_status.icon(),
            self.target,
            self.overall_status,
            self.checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.version
        );

        for check in &self.checks {
            output.push_str(&format!(
                "{} {:<20} {} in {}ms\n",
                check.status.icon(),
                check.component.label(),
                check.status,
                check.latency_ms
            ));

            if let Some(detail) = &check.detail {
                output.push_str(&format!("    {}\n", detail));
            }
        }

        output
    }
}

/// Drops the user and password from a connection URL.
pub fn redact_dsn(dsn: &str) -> String {
    match dsn.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
            format!("{}://{}", scheme, host)
        }
        None => dsn.to_string(),
    }
}

pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("{} started", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "{} finished in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "{} finished: {} rows in {:.2}s",
            self.operation,
            count,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "{} for {:?} took {:.2}s, over the {:.2}s threshold",
                self.operation,
                message,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}
