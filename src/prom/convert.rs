use std::collections::{BTreeMap, HashSet};

use chrono::Utc;

use super::model::{LabelSet, MetricPoint, ParsedSet};

/// Counters and gauges forwarded when the caller supplies no filter.
pub const KEY_METRICS: &[&str] = &[
    "http_requests_total",
    "orders_created_total",
    "orders_success_total",
    "orders_failed_total",
    "payments_processed_total",
    "errors_total",
    "chaos_events_total",
    "simulated_latency_ms",
];

/// Histogram base names promoted to an output metric, as `(base, output)`
/// pairs. Bases missing from this table are grouped but never emitted.
pub const HISTOGRAM_RENAMES: &[(&str, &str)] =
    &[("http_request_duration_seconds", "api_latency_seconds")];

/// Turns a parsed sample set into the dimensioned points the monitoring sink
/// accepts: histogram sum/count pairs collapse into per-series averages, and
/// allow-listed counters and gauges pass through unchanged.
pub struct MetricConverter {
    key_metrics: Vec<String>,
    histogram_renames: BTreeMap<String, String>,
}

impl MetricConverter {
    pub fn new<K, H>(key_metrics: K, histogram_renames: H) -> MetricConverter
    where
        K: IntoIterator<Item = String>,
        H: IntoIterator<Item = (String, String)>,
    {
        MetricConverter {
            key_metrics: key_metrics.into_iter().collect(),
            histogram_renames: histogram_renames.into_iter().collect(),
        }
    }

    /// Converts `parsed` into a batch of points sharing one timestamp.
    ///
    /// A non-empty `filter` replaces the default key-metric allow-list; it is
    /// matched against full metric names, histogram components included, so a
    /// filter naming only counters suppresses histogram output. Missing or
    /// incomplete data never errors, it only shrinks the batch.
    pub fn convert(
        &self,
        parsed: &ParsedSet,
        namespace: &str,
        filter: Option<&HashSet<String>>,
    ) -> Vec<MetricPoint> {
        let now = Utc::now();
        let filter = filter.filter(|f| !f.is_empty());
        let mut points = Vec::new();

        // Histogram components grouped by stripped base name, each group
        // indexed by label set. A later duplicate of a series replaces the
        // earlier one, so a pair yields at most one point.
        let mut sums: BTreeMap<&str, BTreeMap<&LabelSet, f64>> = BTreeMap::new();
        let mut counts: BTreeMap<&str, BTreeMap<&LabelSet, f64>> = BTreeMap::new();
        for sample in parsed.values().flatten() {
            if let Some(filter) = filter {
                if !filter.contains(&sample.name) {
                    continue;
                }
            }
            if let Some(base) = sample.name.strip_suffix("_sum") {
                sums.entry(base).or_default().insert(&sample.labels, sample.value);
            } else if let Some(base) = sample.name.strip_suffix("_count") {
                counts
                    .entry(base)
                    .or_default()
                    .insert(&sample.labels, sample.value);
            }
        }

        for (base, output) in &self.histogram_renames {
            let (Some(sum_series), Some(count_series)) =
                (sums.get(base.as_str()), counts.get(base.as_str()))
            else {
                continue;
            };
            for (labels, sum) in sum_series {
                // A zero count has no average; the pair is dropped, as is a
                // sum whose label set never shows up on the count side.
                match count_series.get(labels) {
                    Some(count) if *count > 0.0 => points.push(MetricPoint {
                        namespace: namespace.to_string(),
                        name: output.clone(),
                        dimensions: (*labels).clone(),
                        timestamp: now,
                        value: sum / count,
                    }),
                    _ => {}
                }
            }
        }

        // Direct passthrough of counters and gauges. Histogram internals are
        // never re-exposed under their suffixed names.
        for sample in parsed.values().flatten() {
            if sample.name.ends_with("_sum")
                || sample.name.ends_with("_count")
                || sample.name.ends_with("_bucket")
            {
                continue;
            }
            let keep = match filter {
                Some(filter) => filter.contains(&sample.name),
                None => self.key_metrics.iter().any(|m| *m == sample.name),
            };
            if keep {
                points.push(MetricPoint {
                    namespace: namespace.to_string(),
                    name: sample.name.clone(),
                    dimensions: sample.labels.clone(),
                    timestamp: now,
                    value: sample.value,
                });
            }
        }

        points
    }
}

impl Default for MetricConverter {
    fn default() -> Self {
        MetricConverter::new(
            KEY_METRICS.iter().map(|m| m.to_string()),
            HISTOGRAM_RENAMES
                .iter()
                .map(|(base, output)| (base.to_string(), output.to_string())),
        )
    }
}
