pub mod check;
pub mod run;
pub mod simulate;

use sensirise_core::{AlarmEngine, AlarmTime, AppConfig};

/// Build an engine from a loaded config, seeding the registry.
pub(crate) fn build_engine(
    config: &AppConfig,
    seed_override: Option<u64>,
) -> Result<AlarmEngine, Box<dyn std::error::Error>> {
    let mut engine = match seed_override.or(config.seed) {
        Some(seed) => AlarmEngine::with_seed(seed),
        None => AlarmEngine::new(),
    };

    for spec in &config.alarms {
        let time: AlarmTime = spec.time.parse()?;
        let alarm = engine
            .registry_mut()
            .add(time, spec.label.clone(), spec.challenge);
        if !spec.enabled {
            engine.registry_mut().toggle_enabled(&alarm.id);
        }
    }

    Ok(engine)
}

/// Print one event as a JSON line.
pub(crate) fn print_event(event: &sensirise_core::Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("event serialization failed: {e}"),
    }
}
