//! HTTP-backed implementation of the classifier traits.
//!
//! Talks to a hosted vision endpoint speaking a small JSON protocol: the
//! frame goes out base64-encoded, a typed verdict comes back. One client
//! serves all three classifier roles.

use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{AwakeClassifier, GestureClassifier, ObjectClassifier};
use crate::challenge::Gesture;
use crate::error::ClassifyError;

#[derive(Deserialize)]
struct GestureResponse {
    gesture: Gesture,
}

#[derive(Deserialize)]
struct AwakeResponse {
    awake: bool,
}

#[derive(Deserialize)]
struct ObjectResponse {
    found: bool,
}

/// Classifier client for a JSON-over-HTTP vision endpoint.
pub struct HttpClassifier {
    endpoint: Url,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpClassifier {
    pub fn new(endpoint: &str) -> Result<Self, ClassifyError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ClassifyError::InvalidEndpoint(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClassifyError::Request(e.to_string()))?;
        Ok(Self {
            endpoint,
            client: Client::new(),
            runtime,
        })
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, ClassifyError> {
        let url = self
            .endpoint
            .join(path)
            .map_err(|e| ClassifyError::InvalidEndpoint(e.to_string()))?;

        let resp = self
            .runtime
            .block_on(self.client.post(url).json(&body).send())
            .map_err(|e| ClassifyError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClassifyError::Http {
                status: resp.status().as_u16(),
            });
        }

        self.runtime
            .block_on(resp.json())
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
    }

    fn encode(image: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(image)
    }
}

impl GestureClassifier for HttpClassifier {
    fn classify_gesture(&self, image_jpeg: &[u8]) -> Result<Gesture, ClassifyError> {
        let value = self.post("gesture", json!({ "photo": Self::encode(image_jpeg) }))?;
        let parsed: GestureResponse = serde_json::from_value(value)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        Ok(parsed.gesture)
    }
}

impl AwakeClassifier for HttpClassifier {
    fn classify_awake(&self, image_jpeg: &[u8]) -> Result<bool, ClassifyError> {
        let value = self.post("awake", json!({ "photo": Self::encode(image_jpeg) }))?;
        let parsed: AwakeResponse = serde_json::from_value(value)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        Ok(parsed.awake)
    }
}

impl ObjectClassifier for HttpClassifier {
    fn detect_object(&self, image_jpeg: &[u8], target: &str) -> Result<bool, ClassifyError> {
        let value = self.post(
            "object",
            json!({ "photo": Self::encode(image_jpeg), "target": target }),
        )?;
        let parsed: ObjectResponse = serde_json::from_value(value)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        Ok(parsed.found)
    }
}
