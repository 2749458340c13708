//! Categories command handler

use crate::error::Result;
use crate::search::available_categories;

/// Print every category with the keyword query sent for it
pub fn run() -> Result<()> {
    println!("Available categories:");
    for category in available_categories() {
        println!("  {:22} {}", category.slug(), category.display_name());
        println!("  {:22} {}", "", category.keyword());
    }
    Ok(())
}
