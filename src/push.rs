use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cli::PushArgs;
use crate::prom::{ExpositionParser, MetricConverter};
use crate::sink::MonitoringSink;

/// One push cycle: fetch the exposition text, normalize it, and hand the
/// resulting batch to the monitoring sink. An empty batch skips the post.
pub async fn run(endpoint: &str, args: &PushArgs) -> Result<()> {
    let timeout = Duration::from_secs(args.timeout);
    let text = fetch_exposition_text(endpoint, timeout).await?;

    let parsed = ExpositionParser::new().parse(&text);
    log::info!("Parsed {} metric names", parsed.len());

    let filter: Option<HashSet<String>> = if args.filter.is_empty() {
        None
    } else {
        Some(args.filter.iter().cloned().collect())
    };
    let points = MetricConverter::default().convert(&parsed, &args.namespace, filter.as_ref());
    log::info!("Converted {} metric points", points.len());

    if points.is_empty() {
        log::warn!("No metric points to post after conversion");
        return Ok(());
    }

    let sink = MonitoringSink::new(args.sink.clone(), args.compartment_id.clone(), timeout)?;
    sink.submit(&points).await
}

async fn fetch_exposition_text(endpoint: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("building the scrape client")?;
    client
        .get(endpoint)
        .send()
        .await
        .with_context(|| format!("fetching metrics from {endpoint}"))?
        .error_for_status()
        .context("metrics endpoint answered with an error")?
        .text()
        .await
        .context("reading the exposition text")
}
