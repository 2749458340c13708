//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "search.radius_meters")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            let value = config.get(key).ok_or_else(|| unknown_key(key))?;
            println!("{}", value);
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            // get() masks secrets
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown config key: {}. Available keys: {}",
        key,
        Config::available_keys().join(", ")
    ))
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[search]");
    println!("country = \"{}\"", config.search.country);
    println!("radius_meters = {}", config.search.radius_meters);
    println!("min_results = {}", config.search.min_results);
    println!("detail_concurrency = {}", config.search.detail_concurrency);
    println!("debounce_ms = {}", config.search.debounce_ms);
    println!("request_timeout_secs = {}", config.search.request_timeout_secs);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[map]");
    println!("default_lat = {}", config.map.default_lat);
    println!("default_lng = {}", config.map.default_lng);
    println!("zoom = {}", config.map.zoom);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
    println!();

    println!("[api_keys]");
    print_key("google", &config.api_keys.google);
    print_key("maps_js", &config.api_keys.maps_js);
}

fn print_key(name: &str, value: &str) {
    if value.is_empty() {
        println!("{} = \"\" # not configured", name);
    } else {
        println!("{} = \"***\" # configured", name);
    }
}
