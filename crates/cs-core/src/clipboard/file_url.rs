use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s]*$").expect("valid url regex")
});

/// An absolute URL read from a file-URL clipboard representation.
///
/// Only the shape is validated (`scheme://rest` without whitespace); the
/// string itself is kept verbatim because it doubles as the dedup key of
/// file entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileUrl(String);

impl FileUrl {
    /// Parse the first line of a file-URL representation.
    ///
    /// Returns `None` for anything that is not URL-shaped, letting the
    /// capture pipeline fall through to the text branch.
    pub fn parse(raw: &str) -> Option<Self> {
        let first = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
        if !URL_SHAPE.is_match(first) {
            return None;
        }
        let after_scheme = first.split_once("://").map(|(_, rest)| rest)?;
        if after_scheme.trim_matches('/').is_empty() {
            return None;
        }
        Some(Self(first.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last non-empty path component, percent-decoded.
    pub fn last_path_component(&self) -> String {
        let after_scheme = self
            .0
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.0);
        let path = after_scheme
            .split(['?', '#'])
            .next()
            .unwrap_or(after_scheme);
        let component = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(path);
        match urlencoding::decode(component) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => component.to_string(),
        }
    }
}

impl fmt::Display for FileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
