//! Search command handler
//!
//! Runs one search from the terminal and prints it in the chosen format.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::form::{use_my_location, Debouncer, SearchForm};
use crate::format::{available_formats, get_formatter};
use crate::geo::{get_ip_locator, Geocoder};
use crate::google::GoogleMapsClient;
use crate::results::{SearchResponse, SortKey};
use crate::search::{Category, SearchOrchestrator, SearchSettings};
use clap::Args;
use std::time::Duration;
use tracing::info;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Street address or postcode to search around
    #[arg(conflicts_with = "here")]
    pub address: Option<String>,

    /// What to look for (name or slug, see `categories`)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Use current location (IP geolocation, then reverse geocoding)
    #[arg(long)]
    pub here: bool,

    /// Sort order: distance or rating
    #[arg(long, short = 's', value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Google API key (overrides config and environment)
    #[arg(long)]
    pub api_key: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

fn parse_sort(value: &str) -> std::result::Result<SortKey, String> {
    value.parse().map_err(|e: Error| e.to_string())
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(radius) = args.radius {
        config.search.radius_meters = radius;
    }

    let format = args.format.as_deref().unwrap_or("text");
    let formatter =
        get_formatter(format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let client = match &args.api_key {
        Some(key) => GoogleMapsClient::new(key.clone(), config.search.request_timeout_secs)?,
        None => GoogleMapsClient::from_config(&config)?,
    };
    let geocoder = Geocoder::new(&client, config.search.country.clone());

    // Determine address
    let address = if args.here {
        let location = get_ip_locator().locate().await?;
        let address = use_my_location(&geocoder, location.coordinates()).await?;
        eprintln!("Using current location: {}", address);
        address
    } else {
        args.address.clone().unwrap_or_default()
    };

    let category = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    // A single terminal submission has nothing to coalesce with
    let debouncer = Debouncer::new(Duration::ZERO);
    let submission = SearchForm::new(address, category)
        .submit(&geocoder, &debouncer)
        .await?;
    eprintln!("Searching near {}", submission.resolved.display_name);

    let orchestrator = SearchOrchestrator::new(&client, SearchSettings::from(&config.search));
    let results = orchestrator.search(&submission.query).await?;
    info!(count = results.len(), "search finished");

    let response = SearchResponse::new(
        submission.query,
        Some(submission.resolved.display_name),
        &results,
        args.sort.unwrap_or_default(),
    );
    let output = formatter.format(&response, &config)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
