use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};

use super::model::{LabelSet, ParsedSet};
use super::parser::ExpositionParser;

/// Observations kept per series; older ones are discarded.
const HISTORY_LIMIT: usize = 500;

const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub time: DateTime<Local>,
    pub value: f64,
}

/// Scraped values accumulated per metric name and rendered label set,
/// oldest first.
#[derive(Debug, Default)]
pub struct MetricHistory {
    series: BTreeMap<String, BTreeMap<String, Vec<HistoryPoint>>>,
}

impl MetricHistory {
    pub fn metric_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn series_labels(&self, metric: &str) -> Vec<String> {
        self.series
            .get(metric)
            .map(|by_labels| by_labels.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn points(&self, metric: &str, labels: &str) -> Option<&[HistoryPoint]> {
        self.series
            .get(metric)?
            .get(labels)
            .map(Vec::as_slice)
    }

    pub fn record(&mut self, parsed: &ParsedSet) {
        let time = Local::now();
        for (name, samples) in parsed {
            let by_labels = self.series.entry(name.clone()).or_default();
            for sample in samples {
                let points = by_labels.entry(render_labels(&sample.labels)).or_default();
                points.push(HistoryPoint {
                    time,
                    value: sample.value,
                });
                if points.len() > HISTORY_LIMIT {
                    points.remove(0);
                }
            }
        }
    }
}

/// Renders a label set the way the exposition line spells it, used as the
/// series key in the dashboard lists.
pub fn render_labels(labels: &LabelSet) -> String {
    if labels.is_empty() {
        return "<no labels>".to_string();
    }
    labels
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Scrapes the exposition endpoint on a fixed interval from a background
/// thread and folds every parsed sample into a shared history.
pub struct MetricScraper {
    history: Arc<Mutex<MetricHistory>>,
}

impl MetricScraper {
    pub fn new(endpoint: String, scrape_interval: u64) -> MetricScraper {
        let history = Arc::new(Mutex::new(MetricHistory::default()));
        let scraper_history = Arc::clone(&history);
        thread::spawn(move || {
            let parser = ExpositionParser::new();
            let client = reqwest::blocking::Client::builder()
                .timeout(SCRAPE_TIMEOUT)
                .build()
                .expect("building the scrape client");
            loop {
                match scrape_once(&client, &endpoint) {
                    Ok(text) => {
                        let parsed = parser.parse(&text);
                        scraper_history
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .record(&parsed);
                        log::debug!("Scraped {} metric names", parsed.len());
                    }
                    Err(e) => log::error!("Failed to scrape {endpoint}: {e}"),
                }
                thread::sleep(Duration::from_secs(scrape_interval));
            }
        });
        MetricScraper { history }
    }

    pub fn history(&self) -> MutexGuard<'_, MetricHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn scrape_once(client: &reqwest::blocking::Client, endpoint: &str) -> reqwest::Result<String> {
    client.get(endpoint).send()?.error_for_status()?.text()
}

#[cfg(test)]
mod tests {
    use super::super::test_data;
    use super::*;

    #[test]
    fn record_groups_points_by_name_and_labels() {
        let parser = ExpositionParser::new();
        let mut history = MetricHistory::default();
        history.record(&parser.parse(test_data::SCRAPE));

        assert!(history
            .metric_names()
            .contains(&"http_requests_total".to_string()));
        let labels = history.series_labels("http_requests_total");
        assert_eq!(labels.len(), 2);
        let points = history.points("http_requests_total", &labels[0]).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn repeated_scrapes_append_to_the_same_series() {
        let parser = ExpositionParser::new();
        let mut history = MetricHistory::default();
        let parsed = parser.parse("errors_total 1\n");
        history.record(&parsed);
        history.record(&parser.parse("errors_total 4\n"));

        let points = history.points("errors_total", "<no labels>").unwrap();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 4.0]);
    }

    #[test]
    fn history_is_trimmed_to_the_limit() {
        let parser = ExpositionParser::new();
        let mut history = MetricHistory::default();
        let parsed = parser.parse("errors_total 1\n");
        for _ in 0..(HISTORY_LIMIT + 25) {
            history.record(&parsed);
        }

        let points = history.points("errors_total", "<no labels>").unwrap();
        assert_eq!(points.len(), HISTORY_LIMIT);
    }

    #[test]
    fn unknown_series_have_no_points() {
        let history = MetricHistory::default();
        assert!(history.points("nope", "<no labels>").is_none());
        assert!(history.series_labels("nope").is_empty());
    }

    #[test]
    fn labels_render_sorted_and_quoted() {
        let labels: LabelSet = [("route", "/x"), ("method", "GET")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(render_labels(&labels), r#"method="GET", route="/x""#);
    }
}
