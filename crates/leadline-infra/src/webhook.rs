//! Lead webhook delivery.
//!
//! [`HttpLeadSink`] implements the
//! [`LeadSink`](leadline_core::lead::notify::LeadSink) port: one JSON
//! POST per qualified lead. The notifier runs delivery in a detached
//! task and logs the outcome; errors returned here never reach the
//! visitor.

use std::time::Duration;

use leadline_core::lead::notify::LeadSink;
use leadline_types::error::NotifyError;
use leadline_types::lead::LeadPayload;

/// HTTP sink for qualified-lead payloads.
#[derive(Debug, Clone)]
pub struct HttpLeadSink {
    client: reqwest::Client,
}

impl HttpLeadSink {
    /// Create a sink. Deliveries time out after ten seconds.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create reqwest client");

        Self { client }
    }
}

impl Default for HttpLeadSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadSink for HttpLeadSink {
    async fn deliver(&self, url: &str, payload: &LeadPayload) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::Http {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                code: status.as_u16(),
            });
        }
        Ok(())
    }
}
