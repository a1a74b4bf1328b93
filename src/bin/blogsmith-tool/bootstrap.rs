use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fs, io};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

const CFG_FILE_NAME: &str = "blogsmith.toml";

lazy_static! {
    // Quoted relative paths of the sample config: "res/<dir>" and "dist"
    static ref SAMPLE_PATH_REGEX: Regex = Regex::new(r#""(res/\w+|dist)""#).unwrap();
}

fn get_sample_cfg() -> &'static str {
    include_str!("../../../blogsmith.toml")
}

fn write_blog_cfg(out_dir: &Path) -> io::Result<()> {
    let file = File::create(out_dir.join(CFG_FILE_NAME))?;
    let mut writer = BufWriter::new(file);

    let sample_cfg = replace_paths(out_dir, get_sample_cfg());
    writer.write_all(sample_cfg.as_bytes())?;

    writer.flush()
}

fn replace_paths(prefix: &Path, config_data: &str) -> String {
    let prefix = prefix.to_string_lossy();
    let prefix = prefix.trim_end_matches('/');

    SAMPLE_PATH_REGEX.replace_all(config_data, |caps: &Captures| {
        let relative = caps[1].trim_start_matches("res/");
        format!("\"{}/{}\"", prefix, relative)
    }).to_string()
}

pub fn bootstrap_cmd(args: BootstrapArgs) {
    let out_path = match fs::canonicalize(&args.out_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error converting path to absolute: {} - {}", &args.out_dir, e);
            return;
        }
    };

    if !out_path.is_dir() {
        eprintln!("Output path must be a directory: {}", out_path.display());
        return;
    }

    if let Err(e) = decompress_files(&out_path) {
        eprintln!("Error bootstrapping: {}", e);
        return;
    };

    if let Err(e) = write_blog_cfg(&out_path) {
        eprintln!("Error writing blog configuration: {}", e);
        return;
    }

    println!("New blog created in {}", out_path.display());
    println!("Run blogsmith --config-path {}", out_path.join(CFG_FILE_NAME).display());
}
