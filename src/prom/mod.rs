mod model;
pub use self::model::LabelSet;
pub use self::model::MetricPoint;
pub use self::model::ParsedSet;
pub use self::model::Sample;

mod parser;
pub use self::parser::ExpositionParser;

mod convert;
pub use self::convert::MetricConverter;
pub use self::convert::HISTOGRAM_RENAMES;
pub use self::convert::KEY_METRICS;

mod metric_scraper;
pub use self::metric_scraper::HistoryPoint;
pub use self::metric_scraper::MetricHistory;
pub use self::metric_scraper::MetricScraper;

#[cfg(test)]
mod test_data;
