use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Label key/value pairs identifying one time series within a metric name.
///
/// Kept sorted by key, so two label sets compare equal regardless of the
/// order the labels appeared in on the exposition line.
pub type LabelSet = BTreeMap<String, String>;

/// One observed value for a named metric, extracted from a single line of
/// exposition text.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub value: f64,
    pub labels: LabelSet,
}

/// All samples extracted from one exposition payload, grouped by metric name.
/// Samples under a name keep the order they appeared in the source text.
pub type ParsedSet = BTreeMap<String, Vec<Sample>>;

/// A normalized, timestamped, dimensioned value ready for the monitoring
/// sink. Every point of one conversion batch shares the same timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub namespace: String,
    pub name: String,
    pub dimensions: LabelSet,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}
