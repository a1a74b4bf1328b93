use chrono::NaiveDate;

use crate::content::PostError;
use crate::text_utils::parse_date;

const DELIMITER: &str = "---";
const TAG_SEPARATOR: char = '|';

/// A post file cut into its three sections.
///
/// ```text
/// <summary text>
/// ---
/// <date> [| tag, tag]
/// ---
/// <body>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub summary: String,
    pub metadata: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    /// Date as written in the file
    pub date: String,
    pub published: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl RawPost {
    /// Cuts at the first two lines made only of `---`. Anything after the
    /// second one is body, including further `---` lines.
    pub fn parse(content: &str) -> Result<RawPost, PostError> {
        let mut sections: Vec<String> = vec![String::new()];

        for line in content.lines() {
            if sections.len() < 3 && line.trim() == DELIMITER {
                sections.push(String::new());
                continue;
            }
            if let Some(section) = sections.last_mut() {
                section.push_str(line);
                section.push('\n');
            }
        }

        if sections.len() < 3 {
            return Err(PostError::Malformed { parts: sections.len() });
        }

        let body = sections.pop().unwrap_or_default();
        let metadata = sections.pop().unwrap_or_default();
        let summary = sections.pop().unwrap_or_default();

        Ok(RawPost {
            summary: summary.trim().to_string(),
            metadata: metadata.trim().to_string(),
            body: body.trim().to_string(),
        })
    }

    pub fn meta(&self) -> PostMeta {
        PostMeta::parse(&self.metadata)
    }
}

impl PostMeta {
    pub fn parse(metadata: &str) -> PostMeta {
        let line = metadata.lines()
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let (date, tags) = match line.split_once(TAG_SEPARATOR) {
            Some((date, tags)) => (date.trim(), extract_tags(tags)),
            None => (line.trim(), vec![]),
        };

        PostMeta {
            date: date.to_string(),
            published: parse_date(date),
            tags,
        }
    }
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}
