use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::markup::{ContentNode, Run};

const DIVIDER: &str = "----------------";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePrefix(pub String);

/// Turns a content tree into output markup.
pub trait ContentRenderer {
    fn render(&self, nodes: &[ContentNode]) -> String;
}

pub struct HtmlRenderer {
    image_prefix: ImagePrefix,
}

impl ContentRenderer for HtmlRenderer {
    fn render(&self, nodes: &[ContentNode]) -> String {
        let mut buf = String::new();
        for node in nodes {
            self.render_node(&mut buf, node);
        }
        buf
    }
}

impl HtmlRenderer {
    pub fn new(image_prefix: ImagePrefix) -> Self {
        HtmlRenderer { image_prefix }
    }

    fn render_node(&self, buf: &mut String, node: &ContentNode) {
        match node {
            ContentNode::Paragraph { runs } => {
                buf.push_str("<p class=\"mb-4\">");
                render_runs(buf, runs);
                buf.push_str("</p>\n");
            }
            ContentNode::CodeBlock { language, code } => {
                let class = if language.is_empty() {
                    String::new()
                } else {
                    format!(" class=\"language-{}\"", encode_double_quoted_attribute(language))
                };
                let _ = writeln!(buf, "<div class=\"code-block\">");
                let _ = writeln!(buf, "<div class=\"divider\">{}</div>", DIVIDER);
                let _ = writeln!(buf, "<pre><code{}>{}</code></pre>", class, encode_text(code));
                let _ = writeln!(buf, "<div class=\"divider\">{}</div>", DIVIDER);
                let _ = writeln!(buf, "</div>");
            }
            ContentNode::ImageEmbed { path } => {
                let src = self.image_src(path);
                let _ = writeln!(buf, "<img class=\"embed\" src=\"{}\" alt=\"{}\">",
                                 encode_double_quoted_attribute(&src),
                                 encode_double_quoted_attribute(path));
            }
        }
    }

    fn image_src(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }

        let ImagePrefix(ref prefix) = self.image_prefix;
        let path = path.trim_start_matches('/');
        if prefix.ends_with('/') {
            format!("{}{}", prefix, path)
        } else {
            format!("{}/{}", prefix, path)
        }
    }
}

fn render_runs(buf: &mut String, runs: &[Run]) {
    for run in runs {
        match run {
            Run::Text { text } => buf.push_str(&encode_text(text)),
            Run::Bold { runs } => {
                buf.push_str("<strong>");
                render_runs(buf, runs);
                buf.push_str("</strong>");
            }
            Run::Code { text } => {
                let _ = write!(buf, "<code class=\"inline\">{}</code>", encode_text(text));
            }
            Run::Link { text, href } => {
                let _ = write!(buf, "<a href=\"{}\">{}</a>", encode_double_quoted_attribute(href), encode_text(text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::markup::transform;

    use super::*;

    fn render(body: &str) -> String {
        let renderer = HtmlRenderer::new(ImagePrefix("/blog/images".to_string()));
        renderer.render(&transform(body).unwrap())
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("Hello **world** & `a<b>` [x](https://x.io?a=1&b=\"2\")"),
                   "<p class=\"mb-4\">Hello <strong>world</strong> &amp; <code class=\"inline\">a&lt;b&gt;</code> <a href=\"https://x.io?a=1&amp;b=&quot;2&quot;\">x</a></p>\n");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(render("```html\n<b>hi</b>\n```"), r##"<div class="code-block">
<div class="divider">----------------</div>
<pre><code class="language-html">&lt;b&gt;hi&lt;/b&gt;</code></pre>
<div class="divider">----------------</div>
</div>
"##);
    }

    #[test]
    fn test_code_block_without_language() {
        assert!(render("```\nx\n```").contains("<pre><code>x</code></pre>"));
    }

    #[test]
    fn test_images() {
        assert_eq!(render("![[diagram.png]]"), "<img class=\"embed\" src=\"/blog/images/diagram.png\" alt=\"diagram.png\">\n");
        assert!(render("![[https://cdn.io/a.png]]").contains("src=\"https://cdn.io/a.png\""));

        let renderer = HtmlRenderer::new(ImagePrefix("img/".to_string()));
        let html = renderer.render(&[ContentNode::ImageEmbed { path: "/a.png".to_string() }]);
        assert!(html.contains("src=\"img/a.png\""));
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(render(""), "");
    }
}
