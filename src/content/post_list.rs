use std::{fs, io};
use std::path::{Path, PathBuf};

const POST_EXTENSION: &str = ".md";

pub struct PostList {
    pub root_dir: PathBuf,
    /// File that turns a directory into a series
    pub summary_file: String,
}

impl PostList {
    /// Solo posts: markdown files directly in the root directory.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = Self::list_entries(&self.root_dir, |file_type| file_type.is_file())?;
        posts.retain(|path| Self::is_post_file(path));
        Ok(posts)
    }

    /// Series: every visible directory in the root directory.
    pub fn retrieve_dirs(&self) -> io::Result<Vec<PathBuf>> {
        Self::list_entries(&self.root_dir, |file_type| file_type.is_dir())
    }

    /// Splits a series directory into its summary file and its posts.
    pub fn series_files(&self, dir: &Path) -> io::Result<(Option<PathBuf>, Vec<PathBuf>)> {
        let mut summary = None;
        let mut posts = vec![];

        for path in Self::list_entries(dir, |file_type| file_type.is_file())? {
            if Self::file_name(&path) == self.summary_file {
                summary = Some(path);
            } else if Self::is_post_file(&path) {
                posts.push(path);
            }
        }

        Ok((summary, posts))
    }

    fn list_entries<F>(dir: &Path, keep: F) -> io::Result<Vec<PathBuf>>
        where F: Fn(&fs::FileType) -> bool
    {
        let mut paths = vec![];
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !keep(&entry.file_type()?) {
                continue;
            }
            let path = entry.path();
            if Self::file_name(&path).starts_with('.') {
                continue;
            }
            paths.push(path);
        }

        // read_dir order is platform dependent
        paths.sort();
        Ok(paths)
    }

    fn is_post_file(path: &Path) -> bool {
        Self::file_name(path).ends_with(POST_EXTENSION)
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
