use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::{Post, Series};
use crate::view::{view_tags, SiteInfo, ViewTag};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_title: &'a str,
    site_description: &'a str,
    home_link: String,
    theme: &'a str,
    empty: bool,
    empty_message: &'a str,
    post_list: Vec<PostItem<'a>>,
    series_list: Vec<SeriesItem<'a>>,
    has_posts: bool,
    has_series: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    title: &'a str,
    link: String,
    date: &'a str,
    summary: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct SeriesItem<'a> {
    name: &'a str,
    summary: &'a str,
    posts: Vec<PostItem<'a>>,
}

/// A series with the posts that could be loaded, in reading order.
pub struct SeriesListing<'a> {
    pub series: &'a Series,
    pub posts: Vec<&'a Post>,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    /// Renders the home page. `solo` is expected in display order.
    pub fn render(&self, site: &SiteInfo, solo: &[&Post], series: &[SeriesListing], empty_message: &str) -> String {
        let post_list: Vec<_> = solo.iter()
            .map(|post| post_item(site, post))
            .collect();

        let series_list: Vec<_> = series.iter()
            .map(|listing| SeriesItem {
                name: &listing.series.name,
                summary: &listing.series.summary,
                posts: listing.posts.iter().map(|post| post_item(site, post)).collect(),
            })
            .collect();

        self.template.render(&ListPage {
            site_title: &site.title,
            site_description: &site.description,
            home_link: site.link(""),
            theme: site.theme.as_str(),
            empty: post_list.is_empty() && series_list.is_empty(),
            empty_message,
            has_posts: !post_list.is_empty(),
            has_series: !series_list.is_empty(),
            post_list,
            series_list,
        })
    }
}

fn post_item<'a>(site: &SiteInfo, post: &'a Post) -> PostItem<'a> {
    PostItem {
        title: &post.entry.title,
        link: site.post_link(&post.entry.link),
        date: &post.meta.date,
        summary: &post.summary,
        tags: view_tags(&post.meta.tags),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::Theme;
    use crate::content::raw_post::PostMeta;
    use crate::content::PostEntry;

    use super::*;

    const TEMPLATE: &str = r##"HOME=[{{home_link}}]
{{#empty}}EMPTY=[{{empty_message}}]{{/empty}}
{{#post_list}}POST=[{{title}}|{{link}}|{{date}}|{{summary}}|{{#tags}}{{tag}};{{/tags}}]{{/post_list}}
{{#series_list}}SERIES=[{{name}}|{{summary}}|{{#posts}}{{link}};{{/posts}}]{{/series_list}}"##;

    fn site() -> SiteInfo {
        SiteInfo {
            title: "t".to_string(),
            description: "d".to_string(),
            base_path: "".to_string(),
            theme: Theme::Dark,
        }
    }

    fn post(path: &str, prefix: Option<&str>, date: &str) -> Post {
        Post {
            entry: PostEntry::from_path(Path::new(path), prefix),
            summary: "A <short> one".to_string(),
            meta: PostMeta {
                date: date.to_string(),
                published: None,
                tags: vec!["rust".to_string(), "cli".to_string()],
            },
            nodes: vec![],
        }
    }

    #[test]
    fn render_list() {
        let hello = post("posts/hello_world.md", None, "2024-03-01");
        let part_1 = post("posts/basics/part_1.md", Some("basics"), "2024-01-01");
        let part_2 = post("posts/basics/part_2.md", Some("basics"), "2024-01-02");
        let series = Series {
            link: "basics".to_string(),
            name: "BASICS".to_string(),
            summary: "From zero".to_string(),
            posts: vec![part_1.entry.clone(), part_2.entry.clone()],
        };

        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let res = renderer.render(&site(), &[&hello], &[SeriesListing {
            series: &series,
            posts: vec![&part_1, &part_2],
        }], "Nothing");

        assert!(res.contains("HOME=[/]"));
        assert!(res.contains("POST=[HELLO WORLD|/blog/hello_world/|2024-03-01|A &lt;short&gt; one|rust;cli;]"));
        assert!(res.contains("SERIES=[BASICS|From zero|/blog/basics/part_1/;/blog/basics/part_2/;]"));
        assert!(!res.contains("EMPTY="));
    }

    #[test]
    fn render_empty_list() {
        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let res = renderer.render(&site(), &[], &[], "Nothing here... yet.");
        assert!(res.contains("EMPTY=[Nothing here... yet.]"));
        assert!(!res.contains("POST="));
    }

    #[test]
    fn template_with_partial_is_rejected() {
        let err = ListRenderer::new("{{>header.tpl}}").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().starts_with("Error parsing list template"));
    }
}
