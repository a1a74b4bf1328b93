use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::{Post, PostEntry, Series};
use crate::view::{view_tags, SiteInfo, ViewTag};

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    site_title: &'a str,
    site_description: &'a str,
    home_link: String,
    theme: &'a str,
    missing: bool,
    missing_message: &'a str,
    post_title: &'a str,
    date: &'a str,
    tags: Vec<ViewTag<'a>>,
    series: Option<SeriesNav>,
    post_content: &'a str,
}

#[derive(ramhorns::Content)]
struct SeriesNav {
    name: String,
    prev: Option<NavLink>,
    next: Option<NavLink>,
}

#[derive(ramhorns::Content)]
struct NavLink {
    title: String,
    link: String,
}

/// Where a post sits inside its series.
pub struct SeriesPosition<'a> {
    pub series: &'a Series,
    pub prev: Option<&'a PostEntry>,
    pub next: Option<&'a PostEntry>,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl<'a> SeriesPosition<'a> {
    pub fn find(series: &'a Series, link: &str) -> Option<SeriesPosition<'a>> {
        let index = series.posts.iter().position(|p| p.link == link)?;
        Some(SeriesPosition {
            series,
            prev: index.checked_sub(1).and_then(|i| series.posts.get(i)),
            next: series.posts.get(index + 1),
        })
    }
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, site: &SiteInfo, post: &Post, position: Option<SeriesPosition>, post_content: &str) -> String {
        let nav_link = |entry: &PostEntry| NavLink {
            title: entry.title.clone(),
            link: site.post_link(&entry.link),
        };
        let series = position.map(|pos| SeriesNav {
            name: pos.series.name.clone(),
            prev: pos.prev.map(nav_link),
            next: pos.next.map(nav_link),
        });

        self.template.render(&PostPage {
            site_title: &site.title,
            site_description: &site.description,
            home_link: site.link(""),
            theme: site.theme.as_str(),
            missing: false,
            missing_message: "",
            post_title: &post.entry.title,
            date: &post.meta.date,
            tags: view_tags(&post.meta.tags),
            series,
            post_content,
        })
    }

    /// Placeholder page for a post that could not be read.
    pub fn render_missing(&self, site: &SiteInfo, title: &str, message: &str) -> String {
        self.template.render(&PostPage {
            site_title: &site.title,
            site_description: &site.description,
            home_link: site.link(""),
            theme: site.theme.as_str(),
            missing: true,
            missing_message: message,
            post_title: title,
            date: "",
            tags: vec![],
            series: None,
            post_content: "",
        })
    }
}
