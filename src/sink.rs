use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::prom::{LabelSet, MetricPoint};

#[derive(Serialize)]
struct Datapoint {
    timestamp: DateTime<Utc>,
    value: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricData<'a> {
    namespace: &'a str,
    name: &'a str,
    dimensions: &'a LabelSet,
    datapoints: Vec<Datapoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostMetricsBody<'a> {
    compartment_id: &'a str,
    metric_data: Vec<MetricData<'a>>,
}

/// Posts point batches to the monitoring ingestion endpoint. A batch is
/// accepted or rejected as a whole; retrying a rejected batch is left to
/// whoever schedules the push.
pub struct MonitoringSink {
    client: Client,
    url: String,
    compartment_id: String,
}

impl MonitoringSink {
    pub fn new(url: String, compartment_id: String, timeout: Duration) -> Result<MonitoringSink> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building the monitoring client")?;
        Ok(MonitoringSink {
            client,
            url,
            compartment_id,
        })
    }

    pub async fn submit(&self, points: &[MetricPoint]) -> Result<()> {
        let body = PostMetricsBody {
            compartment_id: &self.compartment_id,
            metric_data: points.iter().map(to_metric_data).collect(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .context("posting metric data")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("monitoring endpoint rejected the batch: {status} {detail}");
        }
        log::info!("Posted {} metric points", points.len());
        Ok(())
    }
}

fn to_metric_data(point: &MetricPoint) -> MetricData<'_> {
    MetricData {
        namespace: &point.namespace,
        name: &point.name,
        dimensions: &point.dimensions,
        datapoints: vec![Datapoint {
            timestamp: point.timestamp,
            value: point.value,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_format_matches_the_ingestion_contract() {
        let point = MetricPoint {
            namespace: "custom.app".to_string(),
            name: "api_latency_seconds".to_string(),
            dimensions: [("route".to_string(), "/x".to_string())].into_iter().collect(),
            timestamp: "2026-08-07T10:00:00Z".parse().unwrap(),
            value: 0.25,
        };
        let body = PostMetricsBody {
            compartment_id: "ocid1.compartment.oc1..example",
            metric_data: vec![to_metric_data(&point)],
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "compartmentId": "ocid1.compartment.oc1..example",
                "metricData": [{
                    "namespace": "custom.app",
                    "name": "api_latency_seconds",
                    "dimensions": {"route": "/x"},
                    "datapoints": [{
                        "timestamp": "2026-08-07T10:00:00Z",
                        "value": 0.25,
                    }],
                }],
            })
        );
    }
}
