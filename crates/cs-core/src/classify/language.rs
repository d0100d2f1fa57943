//! Source-language sniffing for copied snippets.
//!
//! Detection is deliberately shallow: a handful of keyword and shape
//! signatures per language, checked in an order that keeps the more
//! specific signatures ahead of the looser ones.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeLanguage {
    Json,
    Shell,
    Python,
    Swift,
    Rust,
    Go,
    JavaScript,
    Html,
    Sql,
    C,
}

impl CodeLanguage {
    pub fn tag(self) -> &'static str {
        match self {
            CodeLanguage::Json => "json",
            CodeLanguage::Shell => "shell",
            CodeLanguage::Python => "python",
            CodeLanguage::Swift => "swift",
            CodeLanguage::Rust => "rust",
            CodeLanguage::Go => "go",
            CodeLanguage::JavaScript => "javascript",
            CodeLanguage::Html => "html",
            CodeLanguage::Sql => "sql",
            CodeLanguage::C => "c",
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid language signature regex")
}

static PYTHON_LINE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?m)^\s*(def \w+\(.*\)\s*(->.*)?:\s*$|class \w+(\(.*\))?:\s*$|import [\w.]+( as \w+)?\s*$|from [\w.]+ import \S)")
});
static RUST_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?m)^\s*((pub(\(\w+\))? )?(async )?fn \w+|impl(<.*>)? \w+|use \w+(::\w+)+|let mut \w+|#\[derive\()")
});
static GO_PACKAGE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^package \w+\s*$"));
static GO_FUNC: Lazy<Regex> = Lazy::new(|| re(r"(?m)^func (\(\w+ \*?\w+\) )?\w+\("));
static GO_SHORT_DECL: Lazy<Regex> = Lazy::new(|| re(r"\w+ := "));
static SWIFT_FUNC: Lazy<Regex> = Lazy::new(|| re(r"\bfunc \w+"));
static SWIFT_BINDING: Lazy<Regex> = Lazy::new(|| re(r"\b(let|var) \w+"));
static JS_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    re(r"(\bfunction\s*\w*\s*\(|\b(const|let) \w+ = (\(.*\)|\w+) =>|\bconsole\.log\(|\brequire\(['\x22]|^\s*import .* from ['\x22]|\bexport (default|const|function) )")
});
static SQL_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    re(r"(?is)^\s*(select\s.+\sfrom\s|insert\s+into\s|update\s+\w+\s+set\s|delete\s+from\s|create\s+(table|index|view)\s)")
});
static HTML_DOCUMENT: Lazy<Regex> =
    Lazy::new(|| re(r"(?is)^\s*(<!doctype html|<html[\s>]|<(div|span|body|head|table|ul|p)[\s>].*</\w+>)"));
static C_INCLUDE: Lazy<Regex> = Lazy::new(|| re(r#"(?m)^\s*#include\s*[<"]"#));

/// Guess the source language of `text`, if it looks like code at all.
pub fn detect_language(text: &str) -> Option<CodeLanguage> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(lang) = detect_json(trimmed) {
        return Some(lang);
    }
    if let Some(lang) = detect_shebang(trimmed) {
        return Some(lang);
    }
    if C_INCLUDE.is_match(trimmed) {
        return Some(CodeLanguage::C);
    }
    if HTML_DOCUMENT.is_match(trimmed) {
        return Some(CodeLanguage::Html);
    }
    if SQL_STATEMENT.is_match(trimmed) {
        return Some(CodeLanguage::Sql);
    }
    if GO_PACKAGE.is_match(trimmed)
        || (GO_FUNC.is_match(trimmed) && GO_SHORT_DECL.is_match(trimmed))
    {
        return Some(CodeLanguage::Go);
    }
    if RUST_SIGNATURE.is_match(trimmed) {
        return Some(CodeLanguage::Rust);
    }
    if SWIFT_FUNC.is_match(trimmed) && SWIFT_BINDING.is_match(trimmed) {
        return Some(CodeLanguage::Swift);
    }
    if PYTHON_LINE.is_match(trimmed) {
        return Some(CodeLanguage::Python);
    }
    if JS_SIGNATURE.is_match(trimmed) {
        return Some(CodeLanguage::JavaScript);
    }

    None
}

/// `{`/`[` documents that actually parse as JSON.
fn detect_json(trimmed: &str) -> Option<CodeLanguage> {
    let looks_like_json = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if looks_like_json && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        Some(CodeLanguage::Json)
    } else {
        None
    }
}

fn detect_shebang(trimmed: &str) -> Option<CodeLanguage> {
    let first_line = trimmed.lines().next()?;
    let interpreter = first_line.strip_prefix("#!")?;
    let lang = if interpreter.contains("python") {
        CodeLanguage::Python
    } else if interpreter.contains("node") {
        CodeLanguage::JavaScript
    } else {
        CodeLanguage::Shell
    };
    Some(lang)
}
