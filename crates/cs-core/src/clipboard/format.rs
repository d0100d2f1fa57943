use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of one clipboard representation (a "pasteboard type").
///
/// Platforms expose their own identifiers; adapters translate them into
/// these well-known values where a translation exists and pass anything
/// else through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipboardFormat(pub String);

impl ClipboardFormat {
    pub const TEXT: &'static str = "text/plain";
    pub const HTML: &'static str = "text/html";
    pub const RTF: &'static str = "text/rtf";
    pub const PNG: &'static str = "image/png";
    pub const TIFF: &'static str = "image/tiff";
    pub const JPEG: &'static str = "image/jpeg";
    pub const FILE_URL: &'static str = "text/uri-list";
    /// Marker type published by password managers next to copied secrets.
    pub const CONCEALED: &'static str = "org.nspasteboard.ConcealedType";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn text_plain() -> Self {
        Self::new(Self::TEXT)
    }

    pub fn text_html() -> Self {
        Self::new(Self::HTML)
    }

    pub fn text_rtf() -> Self {
        Self::new(Self::RTF)
    }

    pub fn file_url() -> Self {
        Self::new(Self::FILE_URL)
    }

    pub fn concealed() -> Self {
        Self::new(Self::CONCEALED)
    }

    /// Image representations probed by the capture pipeline, in priority order.
    pub fn image_candidates() -> [ClipboardFormat; 3] {
        [
            Self::new(Self::PNG),
            Self::new(Self::TIFF),
            Self::new(Self::JPEG),
        ]
    }

    /// Representations worth keeping next to the plain string of a text entry.
    pub fn rich_text_formats() -> [ClipboardFormat; 2] {
        [Self::text_rtf(), Self::text_html()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_rich_text(&self) -> bool {
        matches!(self.as_str(), Self::RTF | Self::HTML)
    }

    pub fn is_image(&self) -> bool {
        self.0.starts_with("image/")
    }
}

impl fmt::Display for ClipboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClipboardFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ClipboardFormat(s.to_string()))
    }
}

impl From<&str> for ClipboardFormat {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_detection() {
        assert!(ClipboardFormat::text_rtf().is_rich_text());
        assert!(ClipboardFormat::text_html().is_rich_text());
        assert!(!ClipboardFormat::text_plain().is_rich_text());
    }

    #[test]
    fn test_image_candidates_start_with_png() {
        let candidates = ClipboardFormat::image_candidates();
        assert_eq!(candidates[0].as_str(), ClipboardFormat::PNG);
        assert!(candidates.iter().all(ClipboardFormat::is_image));
    }
}
