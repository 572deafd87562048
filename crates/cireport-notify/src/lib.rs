//! # cireport-notify
//!
//! **Tier 3 (Delivery)**
//!
//! Discord webhook notifications: embed builders for test, coverage,
//! combined and CodeQL results, plus a single-shot delivery behind the
//! [`WebhookTransport`] trait.
//!
//! ## What belongs here
//! * Embed and payload models
//! * Building embeds from parsed summaries and the GitHub context
//! * Webhook URL validation and delivery
//!
//! ## What does NOT belong here
//! * Reading JSON or TSV inputs (the binary does that)
//! * Retries (exactly one POST per notification)

pub mod embed;
pub mod transport;

mod builders;

pub use builders::{
    CombinedData, EmbedContext, codeql_embed, combined_embed, coverage_embed, tests_embed,
};
pub use embed::{Embed, EmbedField, EmbedFooter, Payload, colors};
pub use transport::{HttpTransport, RecordingTransport, WebhookTransport, send};

use thiserror::Error;

/// Accepted webhook URL prefixes.
pub const WEBHOOK_PREFIXES: [&str; 2] = [
    "https://discord.com/api/webhooks/",
    "https://discordapp.com/api/webhooks/",
];

/// Errors from building or delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid Discord webhook URL format")]
    InvalidUrl,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Check that `url` points at a Discord webhook.
pub fn validate_webhook_url(url: &str) -> Result<(), NotifyError> {
    if WEBHOOK_PREFIXES.iter().any(|p| url.starts_with(p)) {
        Ok(())
    } else {
        Err(NotifyError::InvalidUrl)
    }
}
