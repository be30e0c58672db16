//! Site stats types for prime-ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::MetricId;

/// One named metric value for a given day.
///
/// Nothing enforces uniqueness across `(metric, day)`: recording the same
/// metric twice for one day produces two rows, and readers see both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Surrogate key.
    pub id: MetricId,

    /// Metric name (e.g. `"site_visits"`).
    pub metric: String,

    /// Metric value.
    pub value: f64,

    /// Day the value is for.
    pub day: NaiveDate,

    /// When the row was recorded.
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMetricSample {
    /// Metric name.
    pub metric: String,

    /// Metric value.
    pub value: f64,

    /// Day the value is for.
    pub day: NaiveDate,
}

impl NewMetricSample {
    /// Create a payload.
    #[must_use]
    pub fn new(metric: impl Into<String>, value: f64, day: NaiveDate) -> Self {
        Self {
            metric: metric.into(),
            value,
            day,
        }
    }
}
