use super::ClipboardFormat;

/// One representation written back to the system clipboard.
///
/// A write is a list of items published together as a single clipboard
/// change, so a reader sees e.g. the plain string and its HTML rendering
/// as alternatives of the same item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardWriteItem {
    Text(String),
    Html(String),
    Rtf(Vec<u8>),
    /// Encoded image bytes as captured (PNG, TIFF or JPEG).
    Image(Vec<u8>),
    /// Absolute file URL string.
    FileUrl(String),
    Raw {
        format: ClipboardFormat,
        bytes: Vec<u8>,
    },
}

impl ClipboardWriteItem {
    /// Rebuild a write item from a captured auxiliary representation.
    pub fn from_representation(format: &ClipboardFormat, bytes: &[u8]) -> Self {
        match format.as_str() {
            ClipboardFormat::HTML => match String::from_utf8(bytes.to_vec()) {
                Ok(html) => Self::Html(html),
                Err(_) => Self::Raw {
                    format: format.clone(),
                    bytes: bytes.to_vec(),
                },
            },
            ClipboardFormat::RTF => Self::Rtf(bytes.to_vec()),
            _ => Self::Raw {
                format: format.clone(),
                bytes: bytes.to_vec(),
            },
        }
    }

    pub fn format(&self) -> ClipboardFormat {
        match self {
            Self::Text(_) => ClipboardFormat::text_plain(),
            Self::Html(_) => ClipboardFormat::text_html(),
            Self::Rtf(_) => ClipboardFormat::text_rtf(),
            Self::Image(_) => ClipboardFormat::new(ClipboardFormat::PNG),
            Self::FileUrl(_) => ClipboardFormat::file_url(),
            Self::Raw { format, .. } => format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_representation_maps_known_formats() {
        let html = ClipboardWriteItem::from_representation(&ClipboardFormat::text_html(), b"<b>x</b>");
        assert_eq!(html, ClipboardWriteItem::Html("<b>x</b>".to_string()));

        let rtf = ClipboardWriteItem::from_representation(&ClipboardFormat::text_rtf(), b"{\\rtf1}");
        assert_eq!(rtf, ClipboardWriteItem::Rtf(b"{\\rtf1}".to_vec()));

        let other = ClipboardFormat::new("com.example.custom");
        let raw = ClipboardWriteItem::from_representation(&other, &[1, 2]);
        assert_eq!(raw.format(), other);
    }
}
