//! Content filter engine
//!
//! Pure policy evaluator: classifies a channel into one of five content
//! policies and decides allow/delete for an incoming message. Deletion and
//! logging are the caller's side effects.
//!
//! Policy precedence is fixed: media-only, screenshot-only, no-message,
//! no-media, no-content. A channel listed in more than one set is governed
//! by the first match. No-media is violation-only: an allowed message falls
//! through to the no-content check instead of returning early.

use warden_common::PolicyManifest;
use warden_core::Snowflake;

/// Snapshot of the message fields the filter inspects
#[derive(Debug, Clone, Copy)]
pub struct MessageView<'a> {
    pub text: &'a str,
    pub attachment_count: usize,
    pub attachments_all_images: bool,
}

/// A policy violation, carrying both the recorded reason and the
/// user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MediaOnly,
    ScreenshotOnlyText,
    ScreenshotOnlyNonImage,
    NoMessage,
    NoMedia,
    NoContent,
}

impl Violation {
    /// Reason string recorded into the action log
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MediaOnly => "Deleted message in Media-Only Channel",
            Self::ScreenshotOnlyText => "Deleted message in Screenshot-Only Channel",
            Self::ScreenshotOnlyNonImage => {
                "Deleted non-image attachment in Screenshot-Only Channel"
            }
            Self::NoMessage => "Deleted message in No-Message Channel",
            Self::NoMedia => "Deleted media/link in No-Media Channel",
            Self::NoContent => "Deleted message in No-Content Channel",
        }
    }

    /// Notice posted back into the channel for the author
    pub fn notice(&self) -> &'static str {
        match self {
            Self::MediaOnly => {
                "Only images and links are allowed in this channel (no regular chat messages)."
            }
            Self::ScreenshotOnlyText => {
                "Only images/screenshots are allowed in this channel (no text)."
            }
            Self::ScreenshotOnlyNonImage => "Only images/screenshots are allowed in this channel.",
            Self::NoMessage => "Messages are not allowed in this channel.",
            Self::NoMedia => "Media and links are not allowed in this channel.",
            Self::NoContent => "No content is allowed in this channel.",
        }
    }
}

/// Outcome of a policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Delete(Violation),
}

/// Channel content policies, fixed at startup
pub struct ContentFilter {
    media_only: Vec<Snowflake>,
    screenshot_only: Vec<Snowflake>,
    no_media: Vec<Snowflake>,
    no_content: Vec<Snowflake>,
    no_message: Vec<Snowflake>,
}

impl ContentFilter {
    /// Build the filter from the manifest's channel lists
    pub fn new(manifest: &PolicyManifest) -> Self {
        Self {
            media_only: manifest.media_only_channels.clone(),
            screenshot_only: manifest.screenshot_only_channels.clone(),
            no_media: manifest.no_media_channels.clone(),
            no_content: manifest.no_content_channels.clone(),
            no_message: manifest.no_message_channels.clone(),
        }
    }

    /// Evaluate one message against the channel's active policy.
    /// Administrators are exempt from every policy.
    pub fn evaluate(
        &self,
        channel_id: Snowflake,
        author_is_admin: bool,
        message: &MessageView<'_>,
    ) -> Decision {
        if author_is_admin {
            return Decision::Allow;
        }

        if self.media_only.contains(&channel_id) {
            let has_media = message.attachment_count > 0 || contains_link(message.text);
            let has_only_media =
                message.text.trim().is_empty() || contains_only_links(message.text);
            if !has_media || !has_only_media {
                return Decision::Delete(Violation::MediaOnly);
            }
            return Decision::Allow;
        }

        if self.screenshot_only.contains(&channel_id) {
            if message.attachment_count == 0 || !message.text.is_empty() {
                return Decision::Delete(Violation::ScreenshotOnlyText);
            }
            if !message.attachments_all_images {
                return Decision::Delete(Violation::ScreenshotOnlyNonImage);
            }
            return Decision::Allow;
        }

        if self.no_message.contains(&channel_id) {
            return Decision::Delete(Violation::NoMessage);
        }

        if self.no_media.contains(&channel_id)
            && (message.attachment_count > 0 || contains_link(message.text))
        {
            return Decision::Delete(Violation::NoMedia);
        }

        if self.no_content.contains(&channel_id) {
            return Decision::Delete(Violation::NoContent);
        }

        Decision::Allow
    }
}

/// True when any whitespace-delimited token carries an `http://` or
/// `https://` URL
fn contains_link(text: &str) -> bool {
    text.split_whitespace().any(token_has_link)
}

/// True when the text is non-empty and every token is a bare link
fn contains_only_links(text: &str) -> bool {
    let mut tokens = text.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(is_link_token)
}

fn token_has_link(token: &str) -> bool {
    for scheme in ["http://", "https://"] {
        if let Some(idx) = token.find(scheme) {
            if token.len() > idx + scheme.len() {
                return true;
            }
        }
    }
    false
}

fn is_link_token(token: &str) -> bool {
    for scheme in ["http://", "https://"] {
        if let Some(rest) = token.strip_prefix(scheme) {
            return !rest.is_empty();
        }
    }
    false
}
