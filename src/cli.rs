use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueHint;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Metrics endpoint to scrape
    ///
    /// The application endpoint exposing metrics in the text exposition format.
    #[arg(short, long, env="METRICS_ENDPOINT", value_hint=ValueHint::Url, default_value="http://localhost:3000/metrics")]
    pub endpoint: String,

    /// Metrics endpoint's port number
    ///
    /// The port number used in the metrics endpoint. Example: http://localhost:<PORT>/metrics
    #[arg(short, long, env="METRICS_PORT", value_hint=ValueHint::Other)]
    pub port: Option<u16>,

    /// Set the logging level
    ///
    /// Set the logging level to use when logging to the log.out file
    #[arg(short, long, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the metrics endpoint once and post the converted points to the monitoring service
    Push(PushArgs),
    /// Show a live dashboard of the scraped metrics
    Dashboard(DashboardArgs),
    /// Probe the application health endpoint and report the result
    Health(HealthArgs),
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Monitoring ingestion endpoint receiving the converted points
    #[arg(short, long, env="MONITORING_ENDPOINT", value_hint=ValueHint::Url)]
    pub sink: String,

    /// Compartment identifier the posted points are accounted against
    #[arg(short, long, env="MONITORING_COMPARTMENT_ID", value_hint=ValueHint::Other)]
    pub compartment_id: String,

    /// Namespace the posted points are published under
    #[arg(short, long, env="MONITORING_NAMESPACE", value_hint=ValueHint::Other, default_value="custom.app")]
    pub namespace: String,

    /// Only convert the named metrics
    ///
    /// Repeatable. Without it, the built-in key-metric allow-list applies.
    #[arg(short, long, value_hint=ValueHint::Other)]
    pub filter: Vec<String>,

    /// Request timeout in seconds for the scrape and the post
    #[arg(short, long, env="MONITORING_TIMEOUT", value_hint=ValueHint::Other, default_value="10")]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Scrape interval of the metrics endpoint
    ///
    /// The time interval between 2 consecutive scrapes.
    #[arg(short='i', long, env="SCRAPE_INTERVAL", value_hint=ValueHint::Other, default_value="10")]
    pub scrape_interval: u16,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Health endpoint to probe
    #[arg(long, env="HEALTH_ENDPOINT", value_hint=ValueHint::Url, default_value="http://localhost:3000/api/health")]
    pub health_endpoint: String,

    /// Probe timeout in seconds
    #[arg(short, long, env="HEALTH_TIMEOUT", value_hint=ValueHint::Other, default_value="5")]
    pub timeout: u64,
}
