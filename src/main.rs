//! gay2z CLI entry point
//!
//! Nearby LGBTQ+ venue and service search - CLI + web app

use gay2z::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
