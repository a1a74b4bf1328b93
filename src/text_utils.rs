use std::ops::Index;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%m/%d/%Y", "%d %B %Y"];

lazy_static! {
    static ref ISO_DATE_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    static ref SEQUENCE_REGEX: Regex = Regex::new(r"_(\d+)$").unwrap();
}

/// Parses the date part of a post's metadata.
///
/// `2024-03-01` (optionally followed by a time) is tried first, then a few
/// spelled-out forms such as `March 1, 2024`.
pub fn parse_date(buf: &str) -> Option<NaiveDate> {
    let buf = buf.trim();

    // Regex instead of a format string so a trailing time is accepted too
    if let Some(caps) = ISO_DATE_REGEX.captures(buf) {
        let y: i32 = caps.index(1).parse().ok()?;
        let m: u32 = caps.index(2).parse().ok()?;
        let d: u32 = caps.index(3).parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    DATE_FORMATS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(buf, fmt).ok())
}

/// `rust_in_anger_2` becomes `RUST IN ANGER 2`.
pub fn title_from_stem(stem: &str) -> String {
    stem.split('_')
        .filter(|x| !x.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Position of a series post, taken from the `_<n>` suffix of its stem.
pub fn parse_sequence(stem: &str) -> Option<u32> {
    SEQUENCE_REGEX.captures(stem)
        .and_then(|caps| caps.index(1).parse().ok())
}

/// Builds a file-name friendly stem from a post title.
pub fn stem_from_title(title: &str) -> String {
    let title = unidecode::unidecode(title);
    let alpha_chars: String = title.chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-')
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut stem = String::new();
    let mut prev_char = None;
    for c in alpha_chars.chars() {
        if c != '_' || prev_char != Some('_') {
            stem.push(c);
        }
        prev_char = Some(c);
    }

    stem.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2017, 9, 10);
        assert_eq!(parse_date("2017-09-10"), expected);
        assert_eq!(parse_date(" 2017-9-10 10:42:32.123 "), expected);
        assert_eq!(parse_date("September 10, 2017"), expected);
        assert_eq!(parse_date("Sep 10, 2017"), expected);
        assert_eq!(parse_date("09/10/2017"), expected);
        assert_eq!(parse_date("10 September 2017"), expected);

        assert_eq!(parse_date("someday"), None);
        assert_eq!(parse_date("2017-13-40"), None);
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("hello_world"), "HELLO WORLD");
        assert_eq!(title_from_stem("rust_in_anger_2"), "RUST IN ANGER 2");
        assert_eq!(title_from_stem("__odd__name"), "ODD NAME");
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("intro_1"), Some(1));
        assert_eq!(parse_sequence("deep_dive_12"), Some(12));
        assert_eq!(parse_sequence("no_number"), None);
        assert_eq!(parse_sequence("trailing_1x"), None);
    }

    #[test]
    fn test_stem_from_title() {
        assert_eq!(stem_from_title("Post title of mine - dir"), "post_title_of_mine_dir");
        assert_eq!(stem_from_title("Ábaco & friends!"), "abaco_friends");
    }
}
