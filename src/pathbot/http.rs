//! reqwest transport for the Pathbot API.

use log::{debug, trace};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

use super::{ErrorReply, LocationReport, PathbotApi, ServiceError, Step, BLOCKED_MESSAGE};
use crate::config::PathbotConfig;
use crate::logutil::preview;

/// Path of the endpoint that opens a new maze.
pub const START_PATH: &str = "/pathbot/start";

pub struct HttpPathbot {
    client: reqwest::Client,
    base_url: String,
    timeout_seconds: u64,
}

impl HttpPathbot {
    pub fn new(config: &PathbotConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// Absolute URL for a server-relative location path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<(u16, String), ServiceError> {
        let url = self.url_for(path);
        debug!("POST {} {}", url, body);

        let request = self.client.post(&url).json(&body).send();
        let response = timeout(Duration::from_secs(self.timeout_seconds), request)
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout_seconds))??;

        let status = response.status().as_u16();
        let text = response.text().await?;
        trace!("{} -> {} {}", url, status, preview(&text, 200));
        Ok((status, text))
    }
}

impl PathbotApi for HttpPathbot {
    async fn start(&mut self) -> Result<LocationReport, ServiceError> {
        let (status, body) = self.post(START_PATH, json!({})).await?;
        match decode_reply(status, &body)? {
            Step::Moved(report) => Ok(report),
            Step::Blocked(message) => Err(ServiceError::Rejected { status, message }),
        }
    }

    async fn step(&mut self, location_path: &str, heading: char) -> Result<Step, ServiceError> {
        let (status, body) = self
            .post(location_path, json!({ "direction": heading.to_string() }))
            .await?;
        decode_reply(status, &body)
    }
}

/// Turn an HTTP status and body into a move outcome.
///
/// Success bodies must be location reports. Failure bodies are only a blocked
/// move when their `message` is exactly [`BLOCKED_MESSAGE`].
pub fn decode_reply(status: u16, body: &str) -> Result<Step, ServiceError> {
    if (200..300).contains(&status) {
        let report: LocationReport = serde_json::from_str(body)?;
        return Ok(Step::Moved(report));
    }

    let message = serde_json::from_str::<ErrorReply>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| preview(body, 120));

    if message == BLOCKED_MESSAGE {
        Ok(Step::Blocked(message))
    } else {
        Err(ServiceError::Rejected { status, message })
    }
}
