use crate::config::{Config, Theme};

pub mod html_renderer;
pub mod list_renderer;
pub mod post_renderer;

/// Site-wide values every page template receives.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub base_path: String,
    pub theme: Theme,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

impl SiteInfo {
    pub fn from_config(config: &Config) -> Self {
        SiteInfo {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            base_path: config.site.base_path.trim_end_matches('/').to_string(),
            theme: config.site.theme,
        }
    }

    /// Absolute link to `path` under the base path.
    pub fn link(&self, path: &str) -> String {
        format!("{}/{}", self.base_path, path.trim_start_matches('/'))
    }

    pub fn post_link(&self, link: &str) -> String {
        self.link(&format!("blog/{}/", link))
    }
}

fn view_tags(tags: &[String]) -> Vec<ViewTag<'_>> {
    tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(base_path: &str) -> SiteInfo {
        SiteInfo {
            title: "t".to_string(),
            description: "d".to_string(),
            base_path: base_path.to_string(),
            theme: Theme::Dark,
        }
    }

    #[test]
    fn test_links() {
        assert_eq!(site("").link("index.html"), "/index.html");
        assert_eq!(site("/blog.io").post_link("series/part_1"), "/blog.io/blog/series/part_1/");
    }
}
