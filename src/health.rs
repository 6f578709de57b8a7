use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub endpoint: String,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probes the application health endpoint once. Timeouts, connection
/// failures, and non-2xx answers all count as unhealthy rather than errors.
pub async fn check(endpoint: &str, timeout: Duration) -> HealthReport {
    let started = Instant::now();
    let response = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client.get(endpoint).send().await,
        Err(e) => Err(e),
    };
    let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    let timestamp = Utc::now();

    match response {
        Ok(response) => {
            let code = response.status();
            HealthReport {
                status: if code.is_success() {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unhealthy
                },
                endpoint: endpoint.to_string(),
                status_code: Some(code.as_u16()),
                response_time_ms,
                timestamp,
                error: None,
            }
        }
        Err(e) => HealthReport {
            status: HealthStatus::Unhealthy,
            endpoint: endpoint.to_string(),
            status_code: None,
            response_time_ms,
            timestamp,
            error: Some(e.to_string()),
        },
    }
}

pub async fn run(endpoint: &str, timeout_secs: u64) -> Result<()> {
    let report = check(endpoint, Duration::from_secs(timeout_secs)).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!(
        "Health check of {} finished: {:?} in {:.2}ms",
        endpoint,
        report.status,
        report.response_time_ms
    );
    if report.status == HealthStatus::Unhealthy {
        bail!("health check of {endpoint} failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_serialize_without_a_null_error_field() {
        let report = HealthReport {
            status: HealthStatus::Healthy,
            endpoint: "http://localhost:3000/api/health".to_string(),
            status_code: Some(200),
            response_time_ms: 12.5,
            timestamp: Utc::now(),
            error: None,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["status_code"], 200);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unhealthy() {
        // reserved TEST-NET-1 address, nothing listens there
        let report = check("http://192.0.2.1:9/health", Duration::from_millis(50)).await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(report.status_code.is_none());
        assert!(report.error.is_some());
    }
}
