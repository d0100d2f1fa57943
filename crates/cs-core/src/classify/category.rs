use serde::{Deserialize, Serialize};

use super::language::{detect_language, CodeLanguage};
use super::markdown::is_markdown_content;
use crate::entry::EntryType;

/// Which alternate paste representation an entry can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "language")]
pub enum FormatCategory {
    Other,
    Markdown,
    Code(CodeLanguage),
}

/// Classify entry content. Markdown wins over code detection, and only
/// text entries are ever classified.
pub fn classify_format(entry_type: EntryType, content: &str) -> FormatCategory {
    if entry_type != EntryType::Text {
        return FormatCategory::Other;
    }
    if is_markdown_content(content) {
        return FormatCategory::Markdown;
    }
    match detect_language(content) {
        Some(language) => FormatCategory::Code(language),
        None => FormatCategory::Other,
    }
}
