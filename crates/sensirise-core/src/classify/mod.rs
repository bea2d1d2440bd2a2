//! Image-classifier boundary.
//!
//! The core never looks inside an image: the three classifiers are opaque
//! collaborators that turn a camera frame into a typed verdict. Their errors
//! map to the step-local inconclusive outcome; they never crash the tick
//! loop.

pub mod http;

pub use http::HttpClassifier;

use crate::challenge::Gesture;
use crate::error::ClassifyError;

/// Detects a rock-paper-scissors gesture in a camera frame.
pub trait GestureClassifier {
    fn classify_gesture(&self, image_jpeg: &[u8]) -> Result<Gesture, ClassifyError>;
}

/// Judges whether the subject in the frame appears awake.
pub trait AwakeClassifier {
    fn classify_awake(&self, image_jpeg: &[u8]) -> Result<bool, ClassifyError>;
}

/// Checks whether a named object is visible in the frame.
pub trait ObjectClassifier {
    fn detect_object(&self, image_jpeg: &[u8], target: &str) -> Result<bool, ClassifyError>;
}
