//! # SensiRise Core Library
//!
//! Core business logic for the SensiRise wake-up assistant: a registry of
//! user-defined alarms, a wall-clock trigger scheduler, and the challenge
//! orchestration that stands between "an alarm fires" and "the alarm is
//! disarmed". The CLI binary and any GUI are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Alarm Registry**: owns alarm records and their CRUD operations
//! - **Trigger Scheduler**: caller-driven ticks compare wall-clock time
//!   against enabled alarms at minute granularity, de-duplicated by a
//!   per-day trigger ledger
//! - **Challenge Orchestrator**: walks the ringing alarm's step sequence,
//!   advancing only on verified step completions, and auto-disarms on
//!   completion
//! - **Classifier Boundary**: opaque gesture/awake/object classifiers whose
//!   failures become step-local retries, never crashes
//!
//! ## Key Components
//!
//! - [`AlarmEngine`]: facade composing registry, scheduler and orchestrator
//! - [`AlarmRegistry`]: alarm record CRUD
//! - [`ChallengeOrchestrator`]: step state machine
//! - [`AppConfig`]: TOML configuration management

pub mod alarm;
pub mod challenge;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod scheduler;

pub use alarm::{Alarm, AlarmRegistry, AlarmTime, ChallengeKind, TriggerLedger};
pub use challenge::{
    ChallengeOrchestrator, ChallengeSession, ContentGenerator, Gesture, MathOp, MathProblem,
    RejectReason, RoundOutcome, StepContent, StepKind, StepOutcome, StepVerdict,
};
pub use classify::{AwakeClassifier, GestureClassifier, HttpClassifier, ObjectClassifier};
pub use config::{AlarmSpec, AppConfig, ClassifierConfig};
pub use engine::AlarmEngine;
pub use error::{ClassifyError, ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use scheduler::{SchedulerTick, TriggerScheduler};
