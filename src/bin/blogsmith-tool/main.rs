use std::fmt::{Display, Formatter};

use clap::{Parser, ValueEnum};

use crate::bootstrap::bootstrap_cmd;
use crate::dump::dump_cmd;
use crate::post::post_cmd;

mod bootstrap;
mod decompress;
mod dump;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Creating post
    Post(PostArgs),
    /// Bootstrap a new blog
    Bootstrap(BootstrapArgs),
    /// Print the content tree of a post as JSON
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Title of the post, the file name is derived from it
    #[arg(short, long)]
    title: Option<String>,

    /// One line summary shown in the post list
    #[arg(short, long)]
    summary: Option<String>,

    /// Series the post belongs to. The post is written inside its directory
    #[arg(long)]
    series: Option<String>,

    /// Position of the post inside its series
    #[arg(short, long, requires = "series")]
    part: Option<u32>,

    /// Post date. Today when empty
    #[arg(short, long)]
    date: Option<String>,

    /// Comma separated list of tags
    #[arg(long)]
    tags: Option<String>,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new blog will be generated
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct DumpArgs {
    /// Post file to read
    #[arg(short, long)]
    file: String,

    /// Comma separated inline passes to run, in order. Defaults to bold,code,link
    #[arg(short, long)]
    passes: Option<String>,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post content to a file
    File,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
        }
    }
}

fn main() {
    let args = Args::parse();

    match args {
        Args::Post(args) => post_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
        Args::Dump(args) => dump_cmd(args),
    };
}
