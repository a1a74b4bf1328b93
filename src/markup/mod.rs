//! Turns a post body into a tree of content nodes.
//!
//! The body goes through four stages, always in this order:
//! shield fenced code, cut into paragraph units, classify each unit into a
//! block, then run the inline passes (bold, inline code, link) over every
//! paragraph. Every stage returns new values; nothing is edited in place.

use serde::Serialize;

pub mod classify;
pub mod inline;
pub mod segment;
pub mod shield;

use crate::markup::classify::classify;
use crate::markup::inline::{InlinePass, PASS_ORDER};
use crate::markup::segment::segment;
use crate::markup::shield::{shield, ShieldError};

/// A block of post content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    Paragraph { runs: Vec<Run> },
    CodeBlock { language: String, code: String },
    ImageEmbed { path: String },
}

/// A typed fragment of inline content inside a paragraph.
///
/// `Bold` keeps its content as runs so that passes running after the bold
/// pass can still reach the text inside it. `Code` and `Link` are final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Run {
    Text { text: String },
    Bold { runs: Vec<Run> },
    Code { text: String },
    Link { text: String, href: String },
}

impl Run {
    pub fn text(text: &str) -> Run {
        Run::Text { text: text.to_string() }
    }

    pub fn bold(runs: Vec<Run>) -> Run {
        Run::Bold { runs }
    }

    pub fn code(text: &str) -> Run {
        Run::Code { text: text.to_string() }
    }

    pub fn link(text: &str, href: &str) -> Run {
        Run::Link { text: text.to_string(), href: href.to_string() }
    }

    /// Text of the run with every markup marker removed.
    pub fn plain_text(&self) -> String {
        match self {
            Run::Text { text } | Run::Code { text } | Run::Link { text, .. } => text.clone(),
            Run::Bold { runs } => runs.iter().map(Run::plain_text).collect(),
        }
    }
}

impl ContentNode {
    pub fn paragraph(text: &str) -> ContentNode {
        ContentNode::Paragraph { runs: vec![Run::text(text)] }
    }

    pub fn plain_text(&self) -> String {
        match self {
            ContentNode::Paragraph { runs } => runs.iter().map(Run::plain_text).collect(),
            ContentNode::CodeBlock { code, .. } => code.clone(),
            ContentNode::ImageEmbed { .. } => String::new(),
        }
    }
}

/// Transforms a post body with the default pass order.
pub fn transform(body: &str) -> Result<Vec<ContentNode>, ShieldError> {
    transform_with(body, &PASS_ORDER)
}

/// Transforms a post body running `passes` in the given order.
///
/// Fails only when a code placeholder cannot be decoded again, which means the
/// shield itself is broken.
pub fn transform_with(body: &str, passes: &[InlinePass]) -> Result<Vec<ContentNode>, ShieldError> {
    let shielded = shield(body);
    let blocks = segment(&shielded)
        .into_iter()
        .map(classify)
        .collect::<Result<Vec<_>, _>>()?;

    let tree = passes.iter().fold(blocks, |tree, pass| pass.apply(&tree));
    Ok(tree)
}
