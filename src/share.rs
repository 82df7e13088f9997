//! Platform deep links for sharing an exported image
//!
//! The deep-link share strategy: each supported platform has a URL template
//! into which the export image reference and a caption are URL-encoded.
//! Instagram exposes no such template and requires a manual share.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use urlencoding::encode;

/// Share platforms addressable by deep link
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    /// WhatsApp message pre-fill
    Whatsapp,
    /// Telegram share dialog
    Telegram,
    /// Facebook sharer
    Facebook,
    /// X (Twitter) tweet intent
    X,
    /// Instagram — no deep link exists; sharing is manual
    Instagram,
}

impl SharePlatform {
    /// Parse a platform identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "whatsapp" => Some(Self::Whatsapp),
            "telegram" => Some(Self::Telegram),
            "facebook" => Some(Self::Facebook),
            "x" | "twitter" => Some(Self::X),
            "instagram" => Some(Self::Instagram),
            _ => None,
        }
    }

    /// Stable lowercase identifier
    pub fn label(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Facebook => "facebook",
            Self::X => "x",
            Self::Instagram => "instagram",
        }
    }

    /// Build the deep-link URL for sharing `reference` with `caption`.
    ///
    /// Returns `None` for platforms without a URL template (Instagram).
    pub fn deep_link(&self, reference: &str, caption: &str) -> Option<String> {
        match self {
            Self::Whatsapp => Some(format!(
                "https://api.whatsapp.com/send?text={}",
                encode(&format!("{caption} {reference}"))
            )),
            Self::Telegram => Some(format!(
                "https://t.me/share/url?url={}&text={}",
                encode(reference),
                encode(caption)
            )),
            Self::Facebook => Some(format!(
                "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
                encode(reference),
                encode(caption)
            )),
            Self::X => Some(format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(caption),
                encode(reference)
            )),
            Self::Instagram => None,
        }
    }
}

impl FromStr for SharePlatform {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| Error::PlatformNotRecognized(value.to_string()))
    }
}
