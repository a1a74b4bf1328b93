use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use spdlog::{debug, info, warn};

use crate::config::Config;
use crate::content::{Catalog, Post, PostEntry, PostError};
use crate::view::html_renderer::{ContentRenderer, HtmlRenderer, ImagePrefix};
use crate::view::list_renderer::{ListRenderer, SeriesListing};
use crate::view::post_renderer::{PostRenderer, SeriesPosition};
use crate::view::SiteInfo;

const LIST_TEMPLATE: &str = "index.tpl";
const POST_TEMPLATE: &str = "post.tpl";
const BLOG_DIR: &str = "blog";
const NOT_FOUND_LINK: &str = "not-found";
const MALFORMED_MESSAGE: &str = "This post could not be read.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub pages_written: usize,
    /// Links of the posts that got a placeholder page
    pub malformed: Vec<String>,
}

/// Renders the whole site into `config.paths.output_dir`.
///
/// Malformed posts are reported and replaced by a placeholder page. A missing
/// series summary, a corrupt code placeholder or an I/O failure stops the build.
pub fn build_site(config: &Config) -> anyhow::Result<BuildReport> {
    let paths = &config.paths;
    let catalog = Catalog::discover(&paths.posts_dir, &config.defaults.series_summary_file)
        .with_context(|| format!("Error reading posts from {}", paths.posts_dir.display()))?;

    let list_src = read_template(&paths.template_dir, LIST_TEMPLATE)?;
    let post_src = read_template(&paths.template_dir, POST_TEMPLATE)?;
    let list_renderer = ListRenderer::new(&list_src)?;
    let post_renderer = PostRenderer::new(&post_src)?;

    let site = SiteInfo::from_config(config);
    let html = HtmlRenderer::new(ImagePrefix(site.link(&config.defaults.image_prefix)));

    let mut report = BuildReport::default();
    let posts = load_posts(&catalog, &mut report)?;

    let output_dir = &paths.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Error creating output directory {}", output_dir.display()))?;

    for entry in catalog.solo.iter() {
        let page = match posts.get(&entry.link) {
            Some(post) => post_renderer.render(&site, post, None, &html.render(&post.nodes)),
            None => post_renderer.render_missing(&site, &entry.title, MALFORMED_MESSAGE),
        };
        write_page(output_dir, &entry.link, &page, &mut report)?;
    }

    for series in catalog.series.iter() {
        for entry in series.posts.iter() {
            let page = match posts.get(&entry.link) {
                Some(post) => {
                    let position = SeriesPosition::find(series, &entry.link);
                    post_renderer.render(&site, post, position, &html.render(&post.nodes))
                }
                None => post_renderer.render_missing(&site, &entry.title, MALFORMED_MESSAGE),
            };
            write_page(output_dir, &entry.link, &page, &mut report)?;
        }
    }

    let mut solo: Vec<&Post> = catalog.solo.iter()
        .filter_map(|entry| posts.get(&entry.link))
        .collect();
    solo.sort_by(|a, b| newest_first(a, b));

    let series: Vec<SeriesListing> = catalog.series.iter()
        .map(|series| SeriesListing {
            series,
            posts: series.posts.iter().filter_map(|entry| posts.get(&entry.link)).collect(),
        })
        .collect();

    let index = list_renderer.render(&site, &solo, &series, &config.defaults.empty_message);
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, index)
        .with_context(|| format!("Error writing {}", index_path.display()))?;
    report.pages_written += 1;

    if catalog.is_empty() {
        info!("No posts found, writing the empty page");
        let page = post_renderer.render_missing(&site, "NOT FOUND", &config.defaults.empty_message);
        write_page(output_dir, NOT_FOUND_LINK, &page, &mut report)?;
    }

    if paths.public_dir.is_dir() {
        copy_dir(&paths.public_dir, output_dir)
            .with_context(|| format!("Error copying {} into {}", paths.public_dir.display(), output_dir.display()))?;
    } else {
        warn!("Public directory {} not found, skipping", paths.public_dir.display());
    }

    info!("Wrote {} page(s) to {}, {} malformed post(s)",
        report.pages_written, output_dir.display(), report.malformed.len());
    Ok(report)
}

fn read_template(template_dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = template_dir.join(name);
    fs::read_to_string(&path)
        .with_context(|| format!("Error reading template {}", path.display()))
}

fn load_posts(catalog: &Catalog, report: &mut BuildReport) -> anyhow::Result<HashMap<String, Post>> {
    let mut posts = HashMap::new();
    for entry in catalog.entries() {
        match Post::load(entry) {
            Ok(post) => {
                posts.insert(entry.link.clone(), post);
            }
            Err(PostError::Malformed { parts }) => {
                warn!("Skipping malformed post {} ({} part(s) found)", entry.path.display(), parts);
                report.malformed.push(entry.link.clone());
            }
            Err(e) => return Err(e).with_context(|| load_error(entry)),
        }
    }
    Ok(posts)
}

fn load_error(entry: &PostEntry) -> String {
    format!("Error loading post {}", entry.path.display())
}

fn write_page(output_dir: &Path, link: &str, page: &str, report: &mut BuildReport) -> anyhow::Result<()> {
    let page_dir = output_dir.join(BLOG_DIR).join(link);
    fs::create_dir_all(&page_dir)
        .with_context(|| format!("Error creating {}", page_dir.display()))?;

    let page_path = page_dir.join("index.html");
    fs::write(&page_path, page)
        .with_context(|| format!("Error writing {}", page_path.display()))?;

    debug!("Wrote {}", page_path.display());
    report.pages_written += 1;
    Ok(())
}

// Dated posts newest first, undated after them, ties by link
fn newest_first(a: &Post, b: &Post) -> Ordering {
    let by_date = match (a.meta.published, b.meta.published) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.entry.link.cmp(&b.entry.link))
}

fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::config::parse_config;
    use crate::test_data::{POST_DATA, POST_DATA_MALFORMED};

    use super::*;

    const INDEX_TPL: &str = "{{#empty}}EMPTY={{empty_message}}{{/empty}}{{#post_list}}[{{link}}]{{/post_list}}{{#series_list}}<{{name}}>{{/series_list}}";
    const POST_TPL: &str = "{{#missing}}MISSING={{missing_message}}{{/missing}}{{^missing}}TITLE={{post_title}}\n{{{post_content}}}{{/missing}}";

    struct Fixture {
        _root: TempDir,
        posts: PathBuf,
        output: PathBuf,
        config: Config,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        let template = root.path().join("template");
        let public = root.path().join("public");
        let posts = root.path().join("posts");
        let output = root.path().join("dist");
        fs::create_dir_all(&template).unwrap();
        fs::create_dir_all(public.join("css")).unwrap();
        fs::create_dir_all(&posts).unwrap();
        fs::write(template.join(LIST_TEMPLATE), INDEX_TPL).unwrap();
        fs::write(template.join(POST_TEMPLATE), POST_TPL).unwrap();
        fs::write(public.join("css").join("style.css"), "body {}").unwrap();

        let config = parse_config(&format!(r##"
[site]
title = "t"
description = "d"
base_path = "/site"

[paths]
template_dir = "{}"
public_dir = "{}"
posts_dir = "{}"
output_dir = "{}"
"##, template.display(), public.display(), posts.display(), output.display())).unwrap();

        Fixture { _root: root, posts, output, config }
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_build_site() {
        let fx = fixture();
        fs::write(fx.posts.join("older.md"), POST_DATA.replace("2024-03-01", "2023-01-01")).unwrap();
        fs::write(fx.posts.join("newer.md"), POST_DATA).unwrap();
        let series_dir = fx.posts.join("deep_dive");
        fs::create_dir(&series_dir).unwrap();
        fs::write(series_dir.join("summary.md"), "Going deeper").unwrap();
        fs::write(series_dir.join("part_1.md"), POST_DATA).unwrap();

        let report = build_site(&fx.config).unwrap();
        assert_eq!(report.pages_written, 4);
        assert!(report.malformed.is_empty());

        let index = read(fx.output.join("index.html"));
        assert_eq!(index, "[/site/blog/newer/][/site/blog/older/]<DEEP DIVE>");

        let post = read(fx.output.join("blog/newer/index.html"));
        assert!(post.starts_with("TITLE=NEWER\n"));
        assert!(post.contains("<strong>ownership</strong>"));
        assert!(post.contains("src=\"/site/images/borrow.png\""));
        assert!(post.contains(r#"println!("**not bold**");"#));

        assert!(fx.output.join("blog/deep_dive/part_1/index.html").is_file());
        assert!(!fx.output.join("blog/not-found").exists());
        assert_eq!(read(fx.output.join("css/style.css")), "body {}");
    }

    #[test]
    fn test_malformed_post_gets_placeholder() {
        let fx = fixture();
        fs::write(fx.posts.join("good.md"), POST_DATA).unwrap();
        fs::write(fx.posts.join("broken.md"), POST_DATA_MALFORMED).unwrap();

        let report = build_site(&fx.config).unwrap();
        assert_eq!(report.malformed, ["broken"]);
        assert_eq!(read(fx.output.join("blog/broken/index.html")), format!("MISSING={}", MALFORMED_MESSAGE));
        assert_eq!(read(fx.output.join("index.html")), "[/site/blog/good/]");
    }

    #[test]
    fn test_non_utf8_post_is_still_built() {
        let fx = fixture();
        fs::write(fx.posts.join("good.md"), POST_DATA).unwrap();
        fs::write(fx.posts.join("latin1.md"), b"Caf\xe9 au lait\n---\n2024-02-01\n---\nCr\xe8me **br\xfbl\xe9e**").unwrap();

        let report = build_site(&fx.config).unwrap();
        assert!(report.malformed.is_empty());
        assert!(fx.output.join("blog/good/index.html").is_file());

        let page = read(fx.output.join("blog/latin1/index.html"));
        assert!(page.starts_with("TITLE=LATIN1\n"));
        assert!(page.contains("<strong>br\u{FFFD}l\u{FFFD}e</strong>"));
    }

    #[test]
    fn test_empty_blog() {
        let fx = fixture();
        let report = build_site(&fx.config).unwrap();
        assert_eq!(report.pages_written, 2);

        assert_eq!(read(fx.output.join("index.html")), "EMPTY=Nothing here... yet.");
        assert_eq!(read(fx.output.join("blog/not-found/index.html")), "MISSING=Nothing here... yet.");
    }

    #[test]
    fn test_missing_series_summary_fails() {
        let fx = fixture();
        fs::create_dir(fx.posts.join("lonely")).unwrap();
        fs::write(fx.posts.join("lonely").join("part_1.md"), POST_DATA).unwrap();

        let err = build_site(&fx.config).unwrap_err();
        assert!(matches!(err.downcast_ref::<PostError>(), Some(PostError::MissingSeriesSummary { .. })));
        assert!(!fx.output.exists());
    }

    #[test]
    fn test_missing_template_fails() {
        let fx = fixture();
        fs::remove_file(fx.config.paths.template_dir.join(POST_TEMPLATE)).unwrap();
        assert!(build_site(&fx.config).is_err());
    }
}
