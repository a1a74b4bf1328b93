use crate::markup::shield::{is_placeholder, unshield, ShieldError};
use crate::markup::ContentNode;

const IMAGE_OPEN: &str = "![[";
const IMAGE_CLOSE: &str = "]]";
const FENCE: &str = "```";

/// Maps one paragraph unit to its block node.
///
/// Every unit is either a code block, an image embed or a paragraph. The only
/// error is a placeholder that no longer decodes.
pub fn classify(unit: &str) -> Result<ContentNode, ShieldError> {
    let unit = unit.trim();

    if is_placeholder(unit) {
        let fence = unshield(unit)?;
        return Ok(code_block(&fence));
    }

    let text = unshield(unit)?;
    if let Some(path) = image_path(&text) {
        return Ok(ContentNode::ImageEmbed { path });
    }

    Ok(ContentNode::paragraph(&text))
}

fn image_path(text: &str) -> Option<String> {
    let rest = text.strip_prefix(IMAGE_OPEN)?;
    let end = rest.find(IMAGE_CLOSE)?;
    let path = rest[..end].trim();
    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}

fn code_block(fence: &str) -> ContentNode {
    let inner = fence
        .strip_prefix(FENCE)
        .and_then(|f| f.strip_suffix(FENCE))
        .unwrap_or(fence);

    // First line holds the language tag, a one-line fence has none
    let (language, code) = match inner.split_once('\n') {
        Some((first, rest)) => (first.trim(), rest),
        None => ("", inner),
    };
    let code = match code.strip_suffix('\n') {
        Some(code) => code.strip_suffix('\r').unwrap_or(code),
        None => code,
    };

    ContentNode::CodeBlock {
        language: language.to_string(),
        code: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::markup::shield::shield;

    use super::*;

    #[test]
    fn test_paragraph() {
        let node = classify("Just **some** text").unwrap();
        assert_eq!(node, ContentNode::paragraph("Just **some** text"));
    }

    #[test]
    fn test_code_block() {
        let node = classify(&shield("```python\nprint(1)\n```")).unwrap();
        assert_eq!(node, ContentNode::CodeBlock {
            language: "python".to_string(),
            code: "print(1)".to_string(),
        });
    }

    #[test]
    fn test_code_block_without_language() {
        let node = classify(&shield("```\nmake all\n\nmake install\n```")).unwrap();
        assert_eq!(node, ContentNode::CodeBlock {
            language: "".to_string(),
            code: "make all\n\nmake install".to_string(),
        });
    }

    #[test]
    fn test_one_line_fence() {
        let node = classify(&shield("```x = 1```")).unwrap();
        assert_eq!(node, ContentNode::CodeBlock {
            language: "".to_string(),
            code: "x = 1".to_string(),
        });
    }

    #[test]
    fn test_crlf_fence() {
        let node = classify(&shield("```sh\r\nls -la\r\n```")).unwrap();
        assert_eq!(node, ContentNode::CodeBlock {
            language: "sh".to_string(),
            code: "ls -la".to_string(),
        });
    }

    #[test]
    fn test_image_embed() {
        assert_eq!(classify("![[diagram.png]]").unwrap(), ContentNode::ImageEmbed { path: "diagram.png".to_string() });
        assert_eq!(classify("![[ shots/a b.jpg ]] caption").unwrap(), ContentNode::ImageEmbed { path: "shots/a b.jpg".to_string() });
    }

    #[test]
    fn test_not_an_image() {
        assert_eq!(classify("![[diagram.png").unwrap(), ContentNode::paragraph("![[diagram.png"));
        assert_eq!(classify("![[]]").unwrap(), ContentNode::paragraph("![[]]"));
        assert_eq!(classify("see ![[a.png]]").unwrap(), ContentNode::paragraph("see ![[a.png]]"));
    }

    #[test]
    fn test_classification_is_stable() {
        let unit = shield("```go\nfmt.Println()\n```");
        assert_eq!(classify(&unit).unwrap(), classify(&unit).unwrap());
        assert_eq!(classify("plain").unwrap(), classify("plain").unwrap());
    }
}
