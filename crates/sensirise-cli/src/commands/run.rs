use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use sensirise_core::{
    AlarmEngine, AppConfig, AwakeClassifier, Gesture, GestureClassifier, HttpClassifier,
    ObjectClassifier, StepContent, StepVerdict,
};

/// Real-time alarm loop: tick once per interval, print every event as a
/// JSON line, and drive ringing challenges on stdin.
///
/// While an alarm rings the loop blocks on user input; that is safe because
/// the scheduler selects no new candidate while the ringing state is set.
pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;
    let mut engine = super::build_engine(&config, None)?;
    let classifier = match &config.classifier {
        Some(c) => Some(HttpClassifier::new(&c.endpoint)?),
        None => None,
    };
    let interval = Duration::from_secs(config.poll_interval_secs.max(1));

    super::print_event(&engine.snapshot());
    loop {
        for event in engine.tick() {
            super::print_event(&event);
        }
        while engine.ringing().is_some() {
            handle_ringing(&mut engine, classifier.as_ref())?;
        }
        std::thread::sleep(interval);
    }
}

fn handle_ringing(
    engine: &mut AlarmEngine,
    classifier: Option<&HttpClassifier>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = engine.session().map(|s| s.content().clone());
    let Some(content) = content else {
        // No-challenge alarm: an explicit dismiss is all it takes.
        prompt("Alarm ringing (no challenge). Press Enter to dismiss")?;
        if let Some(event) = engine.dismiss() {
            super::print_event(&event);
        }
        return Ok(());
    };

    let verdict = match content {
        StepContent::Math { problem } => {
            let line = prompt(&format!("Solve: {problem} = "))?;
            match line.parse::<i64>() {
                Ok(answer) => StepVerdict::Answer(answer),
                Err(_) => {
                    eprintln!("enter a number");
                    return Ok(());
                }
            }
        }
        StepContent::Rps { .. } => {
            let line = prompt("Rock, paper, scissors! Gesture word or frame path")?;
            gesture_verdict(&line, classifier)
        }
        StepContent::Object { target } => {
            let line = prompt(&format!("Show a {target} to the camera. Frame path or y/n"))?;
            bool_verdict(&line, classifier, |c, bytes| c.detect_object(bytes, target))
                .map_or(StepVerdict::Inconclusive, StepVerdict::ObjectSeen)
        }
        StepContent::Face => {
            let line = prompt("Awake check. Frame path or y/n")?;
            bool_verdict(&line, classifier, |c, bytes| c.classify_awake(bytes))
                .map_or(StepVerdict::Inconclusive, StepVerdict::Awake)
        }
    };

    for event in engine.submit(verdict) {
        super::print_event(&event);
    }
    Ok(())
}

fn prompt(message: &str) -> io::Result<String> {
    eprint!("{message}: ");
    io::stderr().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

/// One trimmed line of input. A zero-byte read means stdin is closed, which
/// is an error here: the ringing loop must not spin re-prompting a reader
/// that will never answer.
fn read_trimmed_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while an alarm was ringing",
        ));
    }
    Ok(line.trim().to_string())
}

/// A typed gesture word, or a camera frame classified over HTTP.
fn gesture_verdict(input: &str, classifier: Option<&HttpClassifier>) -> StepVerdict {
    match input.to_lowercase().as_str() {
        "rock" => return StepVerdict::Gesture(Gesture::Rock),
        "paper" => return StepVerdict::Gesture(Gesture::Paper),
        "scissors" => return StepVerdict::Gesture(Gesture::Scissors),
        _ => {}
    }
    match (classifier, std::fs::read(input)) {
        (Some(c), Ok(bytes)) => match c.classify_gesture(&bytes) {
            Ok(gesture) => StepVerdict::Gesture(gesture),
            Err(e) => {
                eprintln!("classifier: {e}");
                StepVerdict::Inconclusive
            }
        },
        _ => StepVerdict::Inconclusive,
    }
}

/// A typed y/n, or a camera frame classified over HTTP. None means
/// inconclusive.
fn bool_verdict(
    input: &str,
    classifier: Option<&HttpClassifier>,
    classify: impl FnOnce(&HttpClassifier, &[u8]) -> Result<bool, sensirise_core::ClassifyError>,
) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" => return Some(true),
        "n" | "no" => return Some(false),
        _ => {}
    }
    match (classifier, std::fs::read(input)) {
        (Some(c), Ok(bytes)) => match classify(c, &bytes) {
            Ok(verdict) => Some(verdict),
            Err(e) => {
                eprintln!("classifier: {e}");
                None
            }
        },
        _ => None,
    }
}
