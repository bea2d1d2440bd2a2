use std::path::Path;

use chrono::{DateTime, Duration, Local, NaiveTime};
use sensirise_core::{AlarmEngine, AlarmTime, AppConfig, StepContent, StepVerdict};

/// Replay a virtual day one tick per second, auto-solving every challenge,
/// and print the resulting event stream. With a fixed seed the output is
/// fully deterministic, which makes this an executable end-to-end scenario.
pub fn run(
    config_path: &Path,
    seed: Option<u64>,
    from: &str,
    until: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;
    let mut engine = super::build_engine(&config, seed.or(Some(0)))?;

    let from: AlarmTime = from.parse()?;
    let until: AlarmTime = until.parse()?;
    let today = Local::now().date_naive();
    let start = clock(today, from)?;
    let end = clock(today, until)?;

    let mut now = start;
    while now <= end {
        for event in engine.tick_at(now) {
            super::print_event(&event);
        }
        while engine.ringing().is_some() {
            solve_current_step(&mut engine);
        }
        now += Duration::seconds(1);
    }

    super::print_event(&engine.snapshot());
    Ok(())
}

fn clock(
    day: chrono::NaiveDate,
    time: AlarmTime,
) -> Result<DateTime<Local>, Box<dyn std::error::Error>> {
    let naive = day.and_time(
        NaiveTime::from_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
            .ok_or("invalid time of day")?,
    );
    naive
        .and_local_timezone(Local)
        .single()
        .ok_or_else(|| "ambiguous local time".into())
}

/// Answer whatever the active step asks for, correctly.
fn solve_current_step(engine: &mut AlarmEngine) {
    let content = engine.session().map(|s| s.content().clone());
    let verdict = match content {
        None => {
            if let Some(event) = engine.dismiss() {
                super::print_event(&event);
            }
            return;
        }
        Some(StepContent::Math { problem }) => StepVerdict::Answer(problem.answer()),
        Some(StepContent::Rps { app_gesture }) => StepVerdict::Gesture(app_gesture.loses_to()),
        Some(StepContent::Object { .. }) => StepVerdict::ObjectSeen(true),
        Some(StepContent::Face) => StepVerdict::Awake(true),
    };
    for event in engine.submit(verdict) {
        super::print_event(&event);
    }
}
