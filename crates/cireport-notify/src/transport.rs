//! Webhook delivery.

use std::cell::RefCell;
use std::time::Duration;

use crate::NotifyError;
use crate::embed::Payload;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; GitHub-Actions/1.0)";

/// Something that can POST a JSON payload and report the HTTP status.
pub trait WebhookTransport {
    fn post(&self, url: &str, payload: &Payload) -> Result<u16, NotifyError>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(NotifyError::Client)?;
        Ok(Self { client })
    }
}

impl WebhookTransport for HttpTransport {
    fn post(&self, url: &str, payload: &Payload) -> Result<u16, NotifyError> {
        let body = serde_json::to_vec(payload)?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()?;
        let status = response.status().as_u16();
        if status != 204 {
            let text = response.text().unwrap_or_default();
            if !text.is_empty() {
                tracing::debug!(status, body = %text, "webhook response body");
            }
        }
        Ok(status)
    }
}

/// Records payloads instead of sending them. Replies with `status`.
pub struct RecordingTransport {
    pub status: u16,
    sent: RefCell<Vec<(String, Payload)>>,
}

impl RecordingTransport {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, Payload)> {
        self.sent.borrow().clone()
    }
}

impl WebhookTransport for RecordingTransport {
    fn post(&self, url: &str, payload: &Payload) -> Result<u16, NotifyError> {
        self.sent
            .borrow_mut()
            .push((url.to_string(), payload.clone()));
        Ok(self.status)
    }
}

/// POST once. Only HTTP 204 counts as delivered.
pub fn send(
    transport: &dyn WebhookTransport,
    url: &str,
    payload: &Payload,
) -> Result<(), NotifyError> {
    let status = transport.post(url, payload)?;
    match status {
        204 => Ok(()),
        403 => {
            tracing::warn!(status, "Cloudflare or Discord blocking request");
            Err(NotifyError::HttpStatus(status))
        }
        _ => {
            tracing::warn!(status, "unexpected webhook response status");
            Err(NotifyError::HttpStatus(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{Embed, EmbedFooter, colors};

    fn payload() -> Payload {
        Payload::single(
            Embed {
                title: "t".into(),
                description: "d".into(),
                color: colors::GREEN,
                timestamp: "2026-01-01T00:00:00Z".into(),
                fields: Vec::new(),
                footer: EmbedFooter { text: "f".into() },
                url: None,
            },
            "CI/CD Bot",
            "https://example.com/a.png",
        )
    }

    #[test]
    fn no_content_is_success() {
        let transport = RecordingTransport::new(204);
        send(&transport, "https://discord.com/api/webhooks/1/x", &payload()).unwrap();
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn ok_with_body_is_failure() {
        let transport = RecordingTransport::new(200);
        let err = send(&transport, "u", &payload()).unwrap_err();
        assert!(matches!(err, NotifyError::HttpStatus(200)));
    }

    #[test]
    fn forbidden_is_failure_and_not_retried() {
        let transport = RecordingTransport::new(403);
        assert!(send(&transport, "u", &payload()).is_err());
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(10)).is_ok());
    }
}
