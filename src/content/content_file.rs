use std::fs;
use std::path::PathBuf;

use spdlog::warn;

use crate::content::raw_post::RawPost;
use crate::content::PostError;

pub struct ContentFile {
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    /// Reads a post file. Bytes that are not valid UTF-8 are replaced with
    /// U+FFFD instead of failing the read.
    pub fn from_file(file_path: PathBuf) -> Result<ContentFile, PostError> {
        let bytes = fs::read(&file_path)
            .map_err(|e| PostError::io(&file_path, e))?;

        let raw_content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!("Post {} is not valid UTF-8, invalid bytes replaced", file_path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(ContentFile {
            file_path,
            raw_content,
        })
    }

    pub fn parse(&self) -> Result<RawPost, PostError> {
        RawPost::parse(&self.raw_content)
    }
}
