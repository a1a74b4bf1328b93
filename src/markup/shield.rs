use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thiserror::Error;

const CODE_TAG: &str = "$CODE$:";
const TOKEN_FENCE: &str = "~~~";

lazy_static! {
    static ref FENCE_REGEX: Regex = Regex::new(r"(?s)```.*?```").unwrap();

    // Every payload starts with the encoded tag, so only those are tokens.
    // Prose that happens to use `~~~` is left alone.
    static ref TOKEN_REGEX: Regex = {
        let tag_prefix = STANDARD.encode(&CODE_TAG.as_bytes()[..CODE_TAG.len() / 3 * 3]);
        let pattern = format!(r"{TOKEN_FENCE}({}[A-Za-z0-9+/]*={{0,2}}){TOKEN_FENCE}", regex::escape(&tag_prefix));
        Regex::new(&pattern).unwrap()
    };
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShieldError {
    #[error("code placeholder is not valid base64: {0}")]
    InvalidEncoding(String),
    #[error("code placeholder does not decode to UTF-8 text")]
    InvalidUtf8,
    #[error("code placeholder is missing its code tag")]
    MissingTag,
}

/// Replaces every fenced code block with an opaque placeholder token.
pub fn shield(body: &str) -> String {
    FENCE_REGEX
        .replace_all(body, |caps: &Captures| encode_token(&caps[0]))
        .into_owned()
}

/// Puts back the fenced code blocks hidden by [`shield`].
pub fn unshield(text: &str) -> Result<String, ShieldError> {
    let mut res = String::with_capacity(text.len());
    let mut last = 0;

    for caps in TOKEN_REGEX.captures_iter(text) {
        let Some(token) = caps.get(0) else { continue };
        res.push_str(&text[last..token.start()]);
        res.push_str(&decode_payload(&caps[1])?);
        last = token.end();
    }
    res.push_str(&text[last..]);

    Ok(res)
}

/// True when `unit` is a single placeholder and nothing else.
pub fn is_placeholder(unit: &str) -> bool {
    let unit = unit.trim();
    match TOKEN_REGEX.find(unit) {
        Some(token) => token.start() == 0 && token.end() == unit.len(),
        None => false,
    }
}

/// Cuts `text` so each placeholder ends up alone in its own piece.
pub fn split_placeholders(text: &str) -> Vec<&str> {
    let mut pieces = vec![];
    let mut last = 0;

    for token in TOKEN_REGEX.find_iter(text) {
        if token.start() > last {
            pieces.push(&text[last..token.start()]);
        }
        pieces.push(token.as_str());
        last = token.end();
    }
    if last < text.len() {
        pieces.push(&text[last..]);
    }

    pieces
}

fn encode_token(fence: &str) -> String {
    let payload = STANDARD.encode(format!("{CODE_TAG}{fence}"));
    format!("{TOKEN_FENCE}{payload}{TOKEN_FENCE}")
}

fn decode_payload(payload: &str) -> Result<String, ShieldError> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ShieldError::InvalidEncoding(e.to_string()))?;
    let decoded = String::from_utf8(bytes).map_err(|_| ShieldError::InvalidUtf8)?;

    match decoded.strip_prefix(CODE_TAG) {
        Some(fence) => Ok(fence.to_string()),
        None => Err(ShieldError::MissingTag),
    }
}
