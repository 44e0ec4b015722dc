//! Search query heuristics

use std::sync::OnceLock;

use regex::Regex;

/// Whether `query` is an implicit AND of two or more terms.
///
/// Queries already using `OR` (as a word) or `|` are left to the caller.
pub fn is_and_query(query: &str) -> bool {
    static RE_OR: OnceLock<Regex> = OnceLock::new();
    let re_or = RE_OR.get_or_init(|| Regex::new(r"\bOR\b").unwrap());

    if query.trim().is_empty() || re_or.is_match(query) || query.contains('|') {
        return false;
    }

    query.split_whitespace().count() >= 2
}

/// Suggestion shown when an AND query found nothing.
pub fn or_search_suggestion(query: &str) -> String {
    let or_query = query.split_whitespace().collect::<Vec<_>>().join(" OR ");

    format!(
        "---\n\
         No results found. Your query uses AND conditions (space-separated terms).\n\
         Suggestions:\n\
         - Try OR search: \"{or_query}\"\n\
         - Omit some keywords from your query"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_and_query_needs_two_terms() {
        assert!(is_and_query("foo bar"));
        assert!(is_and_query("  foo \t bar  baz "));
        assert!(!is_and_query("foo"));
        assert!(!is_and_query(""));
        assert!(!is_and_query("   "));
    }

    #[test]
    fn test_is_and_query_respects_explicit_or() {
        assert!(!is_and_query("foo OR bar"));
        assert!(!is_and_query("foo | bar"));
        assert!(!is_and_query("foo|bar baz"));
        // Lowercase `or` and words containing OR are plain terms
        assert!(is_and_query("foo or bar"));
        assert!(is_and_query("ORACLE DB"));
    }

    #[test]
    fn test_or_search_suggestion() {
        let suggestion = or_search_suggestion("foo  bar baz");

        assert!(suggestion.starts_with("---\nNo results found."));
        assert!(suggestion.contains("\"foo OR bar OR baz\""));
        assert!(suggestion.contains("AND conditions"));
        assert!(suggestion.ends_with("- Omit some keywords from your query"));
    }
}
