//! Fuzzy subsequence search over clipboard entries.
//!
//! A query matches when all of its characters appear in the text in order,
//! case-insensitively. Matches are ranked by how "tight" they are:
//! consecutive runs, a match at the very start, and matches right after a
//! word separator all earn bonuses.

use crate::entry::ClipboardEntry;

const MATCH_SCORE: i64 = 1;
const CONSECUTIVE_BONUS: i64 = 2;
const START_BONUS: i64 = 3;
const SEPARATOR_BONUS: i64 = 2;

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '/' | '-' | '_' | '.')
}

/// Score `text` against `query`.
///
/// Returns `None` when some query character cannot be matched in order.
/// An empty query matches everything with a score of zero.
pub fn fuzzy_score(query: &str, text: &str) -> Option<i64> {
    let query: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if query.is_empty() {
        return Some(0);
    }
    let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();

    let mut score = 0;
    let mut previous_match: Option<usize> = None;
    let mut cursor = 0;

    for &wanted in &query {
        let offset = text[cursor..].iter().position(|&c| c == wanted)?;
        let index = cursor + offset;

        score += MATCH_SCORE;
        if previous_match.is_some_and(|prev| prev + 1 == index) {
            score += CONSECUTIVE_BONUS;
        }
        if index == 0 {
            score += START_BONUS;
        } else if is_separator(text[index - 1]) {
            score += SEPARATOR_BONUS;
        }

        previous_match = Some(index);
        cursor = index + 1;
    }

    Some(score)
}

/// Filter and rank entries for `query`.
///
/// An empty query returns the entries unchanged. Otherwise non-matching
/// entries are dropped, and the rest are returned starred-first, each group
/// ordered by descending score. Equal scores keep their original order.
/// Password entries are matched against an empty string and so never
/// appear in the results of a non-empty query.
pub fn filter_entries(entries: &[ClipboardEntry], query: &str) -> Vec<ClipboardEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let mut starred = Vec::new();
    let mut unstarred = Vec::new();
    for entry in entries {
        if let Some(score) = fuzzy_score(query, entry.search_text()) {
            if entry.is_starred() {
                starred.push((score, entry));
            } else {
                unstarred.push((score, entry));
            }
        }
    }

    // sort_by is stable, ties stay newest-first
    starred.sort_by(|a, b| b.0.cmp(&a.0));
    unstarred.sort_by(|a, b| b.0.cmp(&a.0));

    starred
        .into_iter()
        .chain(unstarred)
        .map(|(_, entry)| entry.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;

    fn text(content: &str) -> ClipboardEntry {
        ClipboardEntry::text(content, Utc::now(), BTreeMap::new())
    }

    fn contents(entries: &[ClipboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.content()).collect()
    }

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(fuzzy_score("", "anything"), Some(0));
        assert_eq!(fuzzy_score("", ""), Some(0));
    }

    #[test]
    fn test_missing_character_is_no_match() {
        assert_eq!(fuzzy_score("xyz", "hello"), None);
        assert_eq!(fuzzy_score("a", ""), None);
        assert_eq!(fuzzy_score("ba", "ab"), None);
    }

    #[test]
    fn test_bonus_accounting() {
        // 5 matches + 4 consecutive bonuses + start bonus
        assert_eq!(fuzzy_score("hello", "hello world"), Some(5 + 8 + 3));
        // separator bonus instead of start bonus
        assert_eq!(fuzzy_score("hello", "say hello"), Some(5 + 8 + 2));
        assert_eq!(fuzzy_score("hello", "xhello world"), Some(5 + 8));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(fuzzy_score("HeLLo", "hello"), fuzzy_score("hello", "HELLO"));
        assert!(fuzzy_score("README", "readme.md").is_some());
    }

    #[test]
    fn test_subsequence_may_skip_characters() {
        assert_eq!(fuzzy_score("cfg", "config"), Some(3 + 3));
    }

    #[test]
    fn test_start_of_string_ranks_first() {
        let entries = vec![text("xhello world"), text("hello world"), text("say hello")];
        let ranked = filter_entries(&entries, "hello");
        assert_eq!(contents(&ranked), vec!["hello world", "say hello", "xhello world"]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let entries = vec![text("b"), text("a"), text("c")];
        let ranked = filter_entries(&entries, "");
        assert_eq!(contents(&ranked), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_starred_group_comes_first() {
        let entries = vec![
            text("hello there"),
            text("oh hello").with_starred(true),
            text("goodbye"),
        ];
        let ranked = filter_entries(&entries, "hello");
        assert_eq!(contents(&ranked), vec!["oh hello", "hello there"]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let entries = vec![text("abc one"), text("abc two"), text("abc three")];
        let ranked = filter_entries(&entries, "abc");
        assert_eq!(contents(&ranked), vec!["abc one", "abc two", "abc three"]);
    }

    #[test]
    fn test_password_entries_are_never_returned() {
        let secret = ClipboardEntry::password("p@ssw0rd", Utc::now(), Duration::seconds(60));
        let entries = vec![secret, text("password manager")];
        for query in ["p", "pass", "p@ssw0rd", "w"] {
            let ranked = filter_entries(&entries, query);
            assert!(ranked.iter().all(|e| !e.is_password()), "query {query}");
        }
    }
}
