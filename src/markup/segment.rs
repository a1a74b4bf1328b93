use lazy_static::lazy_static;
use regex::Regex;

use crate::markup::shield::split_placeholders;

lazy_static! {
    static ref BLANK_LINE_REGEX: Regex = Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap();
}

/// Splits a shielded body into paragraph units.
///
/// Units are separated by one or more blank lines. A code placeholder always
/// forms a unit of its own, even when the fence was written right against
/// the surrounding text.
pub fn segment(body: &str) -> Vec<&str> {
    BLANK_LINE_REGEX
        .split(body.trim())
        .flat_map(split_placeholders)
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::markup::shield::{is_placeholder, shield};

    use super::*;

    #[test]
    fn test_blank_lines() {
        let units = segment("first line\nsame paragraph\n\nsecond\n\n\n\nthird");
        assert_eq!(units, vec!["first line\nsame paragraph", "second", "third"]);
    }

    #[test]
    fn test_crlf_and_whitespace_lines() {
        let units = segment("one\r\n\r\ntwo\n  \t\nthree");
        assert_eq!(units, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_no_empty_units() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
        assert_eq!(segment("\n\nonly\n\n"), vec!["only"]);
    }

    #[test]
    fn test_placeholder_is_own_unit() {
        let shielded = shield("text before\n```sh\necho hi\n```\ntext after");
        let units = segment(&shielded);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0], "text before");
        assert!(is_placeholder(units[1]));
        assert_eq!(units[2], "text after");
    }

    #[test]
    fn test_blank_lines_inside_code_do_not_split() {
        let shielded = shield("```py\na = 1\n\n\nb = 2\n```");
        assert_eq!(segment(&shielded).len(), 1);
    }
}
