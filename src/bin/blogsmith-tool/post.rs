use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use blogsmith::text_utils::stem_from_title;

use crate::{PostArgs, PostOutput};

const SUMMARY_FILE: &str = "summary.md";

fn render_post(summary: Option<&str>, date: &str, tags: &[String]) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "{}", summary.unwrap_or("Replace with a one line summary"));
    let _ = writeln!(&mut buf, "---");
    if tags.is_empty() {
        let _ = writeln!(&mut buf, "{}", date);
    } else {
        let _ = writeln!(&mut buf, "{} | {}", date, tags.join(", "));
    }
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "This is a body example. **Bold**, `code` and [links](https://example.com) work here.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "```rust");
    let _ = writeln!(&mut buf, "fn main() {{}}");
    let _ = writeln!(&mut buf, "```");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    buf
}

fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    }).unwrap_or_default()
}

fn post_path(title: &str, series: Option<&str>, part: Option<u32>) -> PathBuf {
    let stem = match part {
        Some(part) => format!("{}_{}", stem_from_title(title), part),
        None => stem_from_title(title),
    };
    let file_name = format!("{}.md", stem);

    match series {
        Some(series) => PathBuf::from(stem_from_title(series)).join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn write_post(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(series_dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(series_dir)?;
        let summary_path = series_dir.join(SUMMARY_FILE);
        if !summary_path.exists() {
            println!("Creating series summary {}", summary_path.display());
            fs::write(&summary_path, "Replace with the series summary\n")?;
        }
    }

    if path.exists() {
        return Err(std::io::Error::new(std::io::ErrorKind::AlreadyExists,
                                       format!("{} already exists", path.display())));
    }
    fs::write(path, content)
}

pub fn post_cmd(args: PostArgs) {
    let date = args.date.clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let tags = parse_tags(args.tags.as_deref());
    let content = render_post(args.summary.as_deref(), &date, &tags);

    match args.output {
        PostOutput::Stdout => {
            print!("{}", content);
        }
        PostOutput::File => {
            let Some(ref title) = args.title else {
                eprintln!("For file output, title is required");
                return;
            };
            let path = post_path(title, args.series.as_deref(), args.part);
            println!("Creating file {}", path.display());
            if let Err(e) = write_post(&path, &content) {
                eprintln!("Error writing post {}: {}", path.display(), e);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use blogsmith::content::raw_post::RawPost;

    use super::*;

    #[test]
    fn test_render_post() {
        let tags = parse_tags(Some("rust, , cli"));
        let content = render_post(Some("A first look"), "2024-02-27", &tags);

        let raw = RawPost::parse(&content).unwrap();
        assert_eq!(raw.summary, "A first look");
        assert_eq!(raw.metadata, "2024-02-27 | rust, cli");
        assert_eq!(blogsmith::markup::transform(&raw.body).unwrap().len(), 3);
    }

    #[test]
    fn test_render_post_without_tags() {
        let content = render_post(None, "2024-02-27", &[]);
        assert!(content.starts_with("Replace with a one line summary\n---\n2024-02-27\n---\n"));
    }

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("Post title of mine Ã¡baco - dir2", None, None),
                   PathBuf::from("post_title_of_mine_abaco_dir2.md"));
        assert_eq!(post_path("Borrowing", Some("Rust Basics"), Some(2)),
                   PathBuf::from("rust_basics/borrowing_2.md"));
    }
}
