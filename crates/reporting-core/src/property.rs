//! Parsing of the semi-structured string properties attached to report
//! parameters.

use thiserror::Error;

/// Separator between list items.
const LIST_SEPARATOR: char = ',';

/// Escape character that turns the following separator into a literal.
const ESCAPE: char = '\\';

/// A dependency entry that does not have exactly three segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected 3 colon-separated segments in '{value}', found {segments}")]
pub struct DependencyFormatError {
    /// The offending entry.
    pub value: String,
    /// Number of segments found.
    pub segments: usize,
}

/// Splits a list property on commas not preceded by a backslash and unescapes
/// `\,` into `,` in every token.
///
/// Tokenization follows the usual regex-split rules: trailing empty tokens are
/// dropped, leading and inner empty tokens are kept, and input without any
/// separator yields itself as the only token.
///
/// ```
/// use reporting_core::split_list_property;
///
/// assert_eq!(split_list_property(r"a,b\,c"), vec!["a", "b,c"]);
/// ```
pub fn split_list_property(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for ch in raw.chars() {
        if ch == LIST_SEPARATOR && !escaped {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        escaped = ch == ESCAPE;
    }

    if tokens.is_empty() {
        return vec![unescape(&current)];
    }

    tokens.push(current);
    while tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }

    tokens.iter().map(|token| unescape(token)).collect()
}

fn unescape(token: &str) -> String {
    token.replace("\\,", ",")
}

/// Parses a boolean-like property: `true` in any letter case is true,
/// everything else is false.
pub fn parse_boolean_property(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Removes every double and single quote character.
///
/// Default value expressions are stored as their literal text, so `"North"`
/// becomes `North`.
pub fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_unescaped_commas() {
        assert_eq!(split_list_property("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn escaped_comma_is_literal() {
        assert_eq!(split_list_property(r"a,b\,c"), vec!["a", "b,c"]);
        assert_eq!(split_list_property(r"x\,y\,z"), vec!["x,y,z"]);
    }

    #[test]
    fn single_token_without_separator() {
        assert_eq!(split_list_property("only"), vec!["only"]);
        assert_eq!(split_list_property(""), vec![""]);
    }

    #[test]
    fn trailing_empty_tokens_are_dropped() {
        assert_eq!(split_list_property("a,b,,"), vec!["a", "b"]);
        assert!(split_list_property(",").is_empty());
    }

    #[test]
    fn leading_and_inner_empty_tokens_are_kept() {
        assert_eq!(split_list_property(",a,,b"), vec!["", "a", "", "b"]);
    }

    #[test]
    fn dependency_lists_split_per_triple() {
        assert_eq!(
            split_list_property("a:b:c,d:e:f"),
            vec!["a:b:c", "d:e:f"]
        );
    }

    #[test]
    fn boolean_property_is_lenient() {
        assert!(parse_boolean_property("true"));
        assert!(parse_boolean_property("TRUE"));
        assert!(!parse_boolean_property("yes"));
        assert!(!parse_boolean_property(""));
    }

    #[test]
    fn quotes_are_stripped() {
        assert_eq!(strip_quotes(r#""North""#), "North");
        assert_eq!(strip_quotes("'a' + \"b\""), "a + b");
    }
}
