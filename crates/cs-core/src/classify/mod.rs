//! Pure classifiers deriving entry properties from clipboard content.

mod category;
mod language;
pub mod markdown;
mod password;

pub use category::{classify_format, FormatCategory};
pub use language::{detect_language, CodeLanguage};
pub use markdown::{is_markdown_content, markdown_score, markdown_to_html, MARKDOWN_THRESHOLD};
pub use password::{has_concealed_marker, is_password_like};
