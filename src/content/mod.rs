use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, info};
use thiserror::Error;

use crate::content::content_file::ContentFile;
use crate::content::post_list::PostList;
use crate::content::raw_post::PostMeta;
use crate::markup::shield::ShieldError;
use crate::markup::{transform, ContentNode};
use crate::text_utils::{parse_sequence, title_from_stem};

pub mod content_file;
pub mod post_list;
pub mod raw_post;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("expected summary, metadata and body separated by `---` lines, found {parts} part(s)")]
    Malformed { parts: usize },
    #[error("series {series} has no {file} file")]
    MissingSeriesSummary { series: String, file: String },
    #[error("corrupt code placeholder: {0}")]
    Shield(#[from] ShieldError),
    #[error("error reading {path:?}")]
    Io { path: PathBuf, source: io::Error },
}

impl PostError {
    pub fn io(path: &Path, source: io::Error) -> PostError {
        PostError::Io { path: path.to_path_buf(), source }
    }
}

/// A post file found on disk, not read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    /// Path under `blog/`, `<stem>` or `<series>/<stem>`
    pub link: String,
    pub title: String,
    pub path: PathBuf,
    pub sequence: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub link: String,
    pub name: String,
    pub summary: String,
    pub posts: Vec<PostEntry>,
}

/// Everything the posts directory holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub solo: Vec<PostEntry>,
    pub series: Vec<Series>,
}

/// A post read and transformed, ready for a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub entry: PostEntry,
    pub summary: String,
    pub meta: PostMeta,
    pub nodes: Vec<ContentNode>,
}

impl PostEntry {
    pub fn from_path(path: &Path, link_prefix: Option<&str>) -> PostEntry {
        let stem = path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let link = match link_prefix {
            Some(prefix) => format!("{}/{}", prefix, stem),
            None => stem.clone(),
        };

        PostEntry {
            link,
            title: title_from_stem(&stem),
            path: path.to_path_buf(),
            sequence: parse_sequence(&stem),
        }
    }
}

impl Post {
    pub fn load(entry: &PostEntry) -> Result<Post, PostError> {
        let file = ContentFile::from_file(entry.path.clone())?;
        let raw = file.parse()?;
        let nodes = transform(&raw.body)?;

        Ok(Post {
            entry: entry.clone(),
            meta: raw.meta(),
            summary: raw.summary,
            nodes,
        })
    }
}

impl Catalog {
    pub fn discover(posts_dir: &Path, summary_file: &str) -> Result<Catalog, PostError> {
        let post_list = PostList {
            root_dir: posts_dir.to_path_buf(),
            summary_file: summary_file.to_string(),
        };

        let solo: Vec<PostEntry> = post_list.retrieve_files()
            .map_err(|e| PostError::io(posts_dir, e))?
            .iter()
            .map(|path| PostEntry::from_path(path, None))
            .collect();

        let mut series = vec![];
        for dir in post_list.retrieve_dirs().map_err(|e| PostError::io(posts_dir, e))? {
            series.push(Self::discover_series(&post_list, &dir)?);
        }
        series.sort_by(|a, b| a.name.cmp(&b.name));

        info!("Found {} solo post(s) and {} series in {}", solo.len(), series.len(), posts_dir.display());
        Ok(Catalog { solo, series })
    }

    fn discover_series(post_list: &PostList, dir: &Path) -> Result<Series, PostError> {
        let dir_name = dir.file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (summary_path, post_paths) = post_list.series_files(dir)
            .map_err(|e| PostError::io(dir, e))?;
        let Some(summary_path) = summary_path else {
            return Err(PostError::MissingSeriesSummary {
                series: dir_name,
                file: post_list.summary_file.clone(),
            });
        };
        let summary = std::fs::read_to_string(&summary_path)
            .map_err(|e| PostError::io(&summary_path, e))?;

        let mut posts: Vec<PostEntry> = post_paths.iter()
            .map(|path| PostEntry::from_path(path, Some(&dir_name)))
            .collect();
        posts.sort_by(compare_sequence);

        debug!("Series {} has {} post(s)", dir_name, posts.len());
        Ok(Series {
            link: dir_name.clone(),
            name: title_from_stem(&dir_name),
            summary: summary.trim().to_string(),
            posts,
        })
    }

    /// Empty only when there are neither solo posts nor series.
    pub fn is_empty(&self) -> bool {
        self.solo.is_empty() && self.series.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PostEntry> {
        self.solo.iter()
            .chain(self.series.iter().flat_map(|s| s.posts.iter()))
    }
}

// Numbered posts first, in order, then the rest by link
fn compare_sequence(a: &PostEntry, b: &PostEntry) -> Ordering {
    match (a.sequence, b.sequence) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.link.cmp(&b.link)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.link.cmp(&b.link),
    }
}
