use std::path::Path;

use sensirise_core::AppConfig;

/// Parse the config, seed a registry, and print the normalized alarm list.
pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;
    let engine = super::build_engine(&config, None)?;

    println!("{}", serde_json::to_string_pretty(engine.registry().all())?);
    eprintln!(
        "{} alarm(s), {} enabled",
        engine.registry().len(),
        engine.registry().list_enabled().len()
    );
    Ok(())
}
