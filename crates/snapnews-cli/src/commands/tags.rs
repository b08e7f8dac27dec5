use anyhow::Result;

use snapnews_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.tags.is_empty() {
        println!("No tags configured.");
        println!("\nAdd categories to {} under [[tags]].", AppConfig::config_path().display());
        return Ok(());
    }

    for category in &config.tags {
        println!("{}:", category.name);
        for tag in &category.tags {
            println!("  {}", tag);
        }
        println!();
    }

    Ok(())
}
