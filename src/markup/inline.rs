use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::markup::{ContentNode, Run};

lazy_static! {
    static ref BOLD_REGEX: Regex = Regex::new(r"(?s)\*\*(.+?)\*\*").unwrap();
    static ref CODE_REGEX: Regex = Regex::new(r"(?s)`(.+?)`").unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"\[([^\[\]]*)\]\(([^()\s]*)\)").unwrap();
}

/// One inline markup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlinePass {
    Bold,
    InlineCode,
    Link,
}

/// Bold runs first so `` **`x`** `` is bold around code, never code around
/// asterisks. Link comes last.
pub const PASS_ORDER: [InlinePass; 3] = [InlinePass::Bold, InlinePass::InlineCode, InlinePass::Link];

impl InlinePass {
    /// Splits plain text into the runs this pass recognises.
    pub fn split(self, text: &str) -> Vec<Run> {
        match self {
            InlinePass::Bold => split_spans(text, &BOLD_REGEX, |caps| Run::bold(vec![Run::text(&caps[1])])),
            InlinePass::InlineCode => split_spans(text, &CODE_REGEX, |caps| Run::code(&caps[1])),
            InlinePass::Link => split_spans(text, &LINK_REGEX, |caps| Run::link(&caps[1], &caps[2])),
        }
    }

    pub fn apply(self, nodes: &[ContentNode]) -> Vec<ContentNode> {
        apply_pass(nodes, |text| self.split(text))
    }
}

impl Display for InlinePass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            InlinePass::Bold => "bold",
            InlinePass::InlineCode => "code",
            InlinePass::Link => "link",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InlinePass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bold" => Ok(InlinePass::Bold),
            "code" => Ok(InlinePass::InlineCode),
            "link" => Ok(InlinePass::Link),
            x => Err(format!("Unknown inline pass {}. Expected bold, code or link", x)),
        }
    }
}

/// Runs `pass` over every text leaf of every paragraph and returns a new tree.
///
/// Code blocks and image embeds are copied as they are. Inside a paragraph a
/// text leaf is replaced by the runs the pass produces, bold runs are entered
/// so their text is reached as well, and code and link runs are final.
pub fn apply_pass<F>(nodes: &[ContentNode], pass: F) -> Vec<ContentNode>
    where F: Fn(&str) -> Vec<Run>
{
    nodes.iter()
        .map(|node| match node {
            ContentNode::Paragraph { runs } => ContentNode::Paragraph { runs: rewrite_runs(runs, &pass) },
            other => other.clone(),
        })
        .collect()
}

fn rewrite_runs<F>(runs: &[Run], pass: &F) -> Vec<Run>
    where F: Fn(&str) -> Vec<Run>
{
    let mut res = Vec::with_capacity(runs.len());
    for run in runs {
        match run {
            Run::Text { text } => res.extend(pass(text)),
            Run::Bold { runs } => res.push(Run::Bold { runs: rewrite_runs(runs, pass) }),
            Run::Code { .. } | Run::Link { .. } => res.push(run.clone()),
        }
    }
    res
}

fn split_spans<F>(text: &str, regex: &Regex, to_run: F) -> Vec<Run>
    where F: Fn(&Captures) -> Run
{
    let mut runs = vec![];
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(span) = caps.get(0) else { continue };
        if span.start() > last {
            runs.push(Run::text(&text[last..span.start()]));
        }
        runs.push(to_run(&caps));
        last = span.end();
    }
    if last < text.len() {
        runs.push(Run::text(&text[last..]));
    }

    runs
}
