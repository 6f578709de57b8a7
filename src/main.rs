use clap::Parser;
use prompush::cli::{Cli, Command};
use prompush::logging::app_config;
use prompush::{health, interactive, push};
use regex::Regex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config("log.out", cli.loglevel)).unwrap();
    log::info!("Starting the application!");

    let regex = Regex::new(":(\\d{2,5})/").unwrap();
    let endpoint = match cli.port {
        Some(port) => regex
            .replace(&cli.endpoint, format!(":{port}/", port = port))
            .to_string(),
        None => cli.endpoint,
    };
    log::info!("Reading metrics from endpoint: {}", endpoint);

    match cli.command {
        Command::Push(args) => {
            log::info!("Posting converted points to: {}", args.sink);
            push::run(&endpoint, &args).await?;
        }
        Command::Dashboard(args) => {
            log::info!("Scraping interval is: {}s", args.scrape_interval);
            log::info!("Showing the dashboard");
            interactive::show(endpoint, args.scrape_interval as u64).await?;
        }
        Command::Health(args) => {
            health::run(&args.health_endpoint, args.timeout).await?;
        }
    }
    Ok(())
}
