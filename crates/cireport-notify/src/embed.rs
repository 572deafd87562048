//! Discord embed and webhook payload models.

use serde::{Deserialize, Serialize};

pub mod colors {
    pub const RED: u32 = 0xED4245;
    pub const YELLOW: u32 = 0xFEE75C;
    pub const GREEN: u32 = 0x57F287;
    pub const BLURPLE: u32 = 0x5865F2;
}

/// Discord's limit on a field value.
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// One rich embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    /// ISO-8601 UTC.
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Webhook request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub embeds: Vec<Embed>,
    pub username: String,
    pub avatar_url: String,
}

impl Payload {
    pub fn single(embed: Embed, username: &str, avatar_url: &str) -> Self {
        Self {
            embeds: vec![embed],
            username: username.to_string(),
            avatar_url: avatar_url.to_string(),
        }
    }
}

/// Cap a field value at [`MAX_FIELD_VALUE_CHARS`], ending in `...` when cut.
pub fn clamp_field_value(value: String) -> String {
    if value.chars().count() <= MAX_FIELD_VALUE_CHARS {
        return value;
    }
    let mut cut: String = value.chars().take(MAX_FIELD_VALUE_CHARS - 3).collect();
    cut.push_str("...");
    cut
}
