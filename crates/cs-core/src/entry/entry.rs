use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{classify_format, markdown_score, FormatCategory};
use crate::clipboard::{ClipboardFormat, ContentHash, FileUrl};
use crate::ids::EntryId;

/// Text shown instead of the content of password entries.
pub const PASSWORD_MASK: &str = "••••••••";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Text,
    Image,
    FileUrl,
}

/// Type-specific payload of an entry.
///
/// Image bytes and file URLs can only exist on their own entry type, and
/// auxiliary representations only on text entries.
#[derive(Debug, Clone)]
pub enum EntryPayload {
    Text {
        /// Rich representations captured next to the string (RTF, HTML, ...).
        /// Always empty for password entries.
        pasteboard_data: BTreeMap<ClipboardFormat, Vec<u8>>,
    },
    Image {
        image_data: Bytes,
        image_hash: ContentHash,
    },
    FileUrl {
        url: FileUrl,
    },
}

/// Key used to find a previous occurrence of the same clipboard content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupKey<'a> {
    Text(&'a str),
    Image(ContentHash),
    FileUrl(&'a str),
}

/// One captured clipboard item.
///
/// Entries are values: mutation goes through the `with_*` methods, which
/// return an updated copy carrying the same id. Two entries are equal iff
/// their ids are equal.
#[derive(Debug, Clone)]
pub struct ClipboardEntry {
    id: EntryId,
    content: String,
    timestamp: DateTime<Utc>,
    is_password: bool,
    is_starred: bool,
    expiration_date: Option<DateTime<Utc>>,
    payload: EntryPayload,
}

impl ClipboardEntry {
    /// Plain text entry, optionally carrying rich representations.
    pub fn text(
        content: impl Into<String>,
        captured_at: DateTime<Utc>,
        pasteboard_data: BTreeMap<ClipboardFormat, Vec<u8>>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            timestamp: captured_at,
            is_password: false,
            is_starred: false,
            expiration_date: None,
            payload: EntryPayload::Text { pasteboard_data },
        }
    }

    /// Password entry. Never carries rich representations and expires
    /// `ttl` after capture.
    pub fn password(content: impl Into<String>, captured_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            timestamp: captured_at,
            is_password: true,
            is_starred: false,
            expiration_date: Some(captured_at + ttl),
            payload: EntryPayload::Text {
                pasteboard_data: BTreeMap::new(),
            },
        }
    }

    /// Image entry. Content starts empty and may later be filled by OCR.
    pub fn image(image_data: Bytes, image_hash: ContentHash, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            content: String::new(),
            timestamp: captured_at,
            is_password: false,
            is_starred: false,
            expiration_date: None,
            payload: EntryPayload::Image {
                image_data,
                image_hash,
            },
        }
    }

    /// File entry whose content is the file name.
    pub fn from_file_url(url: FileUrl, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            content: url.last_path_component(),
            timestamp: captured_at,
            is_password: false,
            is_starred: false,
            expiration_date: None,
            payload: EntryPayload::FileUrl { url },
        }
    }

    pub fn with_starred(mut self, starred: bool) -> Self {
        self.is_starred = starred;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_password(&self) -> bool {
        self.is_password
    }

    pub fn is_starred(&self) -> bool {
        self.is_starred
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }

    pub fn entry_type(&self) -> EntryType {
        match self.payload {
            EntryPayload::Text { .. } => EntryType::Text,
            EntryPayload::Image { .. } => EntryType::Image,
            EntryPayload::FileUrl { .. } => EntryType::FileUrl,
        }
    }

    pub fn image_data(&self) -> Option<&Bytes> {
        match &self.payload {
            EntryPayload::Image { image_data, .. } => Some(image_data),
            _ => None,
        }
    }

    pub fn file_url(&self) -> Option<&FileUrl> {
        match &self.payload {
            EntryPayload::FileUrl { url } => Some(url),
            _ => None,
        }
    }

    /// Auxiliary representations; `None` unless this is a text entry that captured some.
    pub fn pasteboard_data(&self) -> Option<&BTreeMap<ClipboardFormat, Vec<u8>>> {
        match &self.payload {
            EntryPayload::Text { pasteboard_data } if !pasteboard_data.is_empty() => {
                Some(pasteboard_data)
            }
            _ => None,
        }
    }

    pub fn dedup_key(&self) -> DedupKey<'_> {
        match &self.payload {
            EntryPayload::Text { .. } => DedupKey::Text(&self.content),
            EntryPayload::Image { image_hash, .. } => DedupKey::Image(*image_hash),
            EntryPayload::FileUrl { url } => DedupKey::FileUrl(url.as_str()),
        }
    }

    /// Content safe to show: password text is replaced by [`PASSWORD_MASK`].
    pub fn display_content(&self) -> &str {
        if self.is_password {
            PASSWORD_MASK
        } else {
            &self.content
        }
    }

    /// Text matched by search; password entries expose nothing.
    pub fn search_text(&self) -> &str {
        if self.is_password {
            ""
        } else {
            &self.content
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| now > expires)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn markdown_score(&self) -> u32 {
        markdown_score(&self.content)
    }

    pub fn format_category(&self) -> FormatCategory {
        classify_format(self.entry_type(), &self.content)
    }

    pub fn has_rich_data(&self) -> bool {
        self.pasteboard_data()
            .is_some_and(|data| data.keys().any(ClipboardFormat::is_rich_text))
    }

    /// First line of the displayable content, truncated to `max_chars`.
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.display_content().lines().next().unwrap_or("");
        if first_line.chars().count() <= max_chars {
            first_line.to_string()
        } else {
            let mut preview: String = first_line
                .chars()
                .take(max_chars.saturating_sub(3))
                .collect();
            preview.push_str("...");
            preview
        }
    }
}

impl PartialEq for ClipboardEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClipboardEntry {}

impl Hash for ClipboardEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CodeLanguage;

    fn rich_data() -> BTreeMap<ClipboardFormat, Vec<u8>> {
        let mut data = BTreeMap::new();
        data.insert(ClipboardFormat::text_html(), b"<b>hi</b>".to_vec());
        data
    }

    #[test]
    fn test_password_entry_masks_and_expires() {
        let now = Utc::now();
        let entry = ClipboardEntry::password("p@ssw0rd", now, Duration::seconds(60));

        assert_eq!(entry.display_content(), PASSWORD_MASK);
        assert_eq!(entry.search_text(), "");
        assert_eq!(entry.expiration_date(), Some(now + Duration::seconds(60)));
        assert!(!entry.is_expired_at(now + Duration::seconds(59)));
        assert!(entry.is_expired_at(now + Duration::seconds(61)));
        assert!(entry.pasteboard_data().is_none());
    }

    #[test]
    fn test_non_password_entries_never_expire() {
        let now = Utc::now();
        let entry = ClipboardEntry::text("hello", now, BTreeMap::new());
        assert_eq!(entry.expiration_date(), None);
        assert!(!entry.is_expired_at(now + Duration::days(365)));
    }

    #[test]
    fn test_equality_is_by_id() {
        let now = Utc::now();
        let a = ClipboardEntry::text("same", now, BTreeMap::new());
        let b = ClipboardEntry::text("same", now, BTreeMap::new());
        assert_ne!(a, b);

        let edited = a.clone().with_content("different").with_starred(true);
        assert_eq!(a, edited);
        assert_eq!(edited.id(), a.id());
        assert_eq!(edited.timestamp(), a.timestamp());
    }

    #[test]
    fn test_payload_accessors_are_exclusive() {
        let now = Utc::now();
        let image = ClipboardEntry::image(Bytes::from_static(b"png"), ContentHash([1; 32]), now);
        assert_eq!(image.entry_type(), EntryType::Image);
        assert!(image.image_data().is_some());
        assert!(image.file_url().is_none());
        assert_eq!(image.content(), "");
        assert!(!image.is_password());

        let url = FileUrl::parse("file:///tmp/a.txt").unwrap();
        let file = ClipboardEntry::from_file_url(url, now);
        assert_eq!(file.entry_type(), EntryType::FileUrl);
        assert_eq!(file.content(), "a.txt");
        assert!(file.image_data().is_none());
        assert!(file.pasteboard_data().is_none());
    }

    #[test]
    fn test_rich_data_and_markdown_priority() {
        let now = Utc::now();
        let entry = ClipboardEntry::text("# Title\n\nSome **bold** text", now, rich_data());
        assert!(entry.has_rich_data());
        assert_eq!(entry.format_category(), FormatCategory::Markdown);

        let code = ClipboardEntry::text("fn main() {}", now, BTreeMap::new());
        assert!(!code.has_rich_data());
        assert_eq!(code.format_category(), FormatCategory::Code(CodeLanguage::Rust));
    }

    #[test]
    fn test_dedup_keys() {
        let now = Utc::now();
        let text = ClipboardEntry::text("abc", now, BTreeMap::new());
        assert_eq!(text.dedup_key(), DedupKey::Text("abc"));

        let url = FileUrl::parse("file:///tmp/a.txt").unwrap();
        let file = ClipboardEntry::from_file_url(url, now);
        assert_eq!(file.dedup_key(), DedupKey::FileUrl("file:///tmp/a.txt"));
    }

    #[test]
    fn test_preview_truncates_first_line() {
        let now = Utc::now();
        let entry = ClipboardEntry::text("a".repeat(40) + "\nsecond", now, BTreeMap::new());
        let preview = entry.preview(10);
        assert_eq!(preview, "aaaaaaa...");

        let short = ClipboardEntry::text("line1\nline2", now, BTreeMap::new());
        assert_eq!(short.preview(50), "line1");
    }
}
