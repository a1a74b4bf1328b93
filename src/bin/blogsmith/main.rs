use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use blogsmith::logger::configure_logger;
use blogsmith::site::build_site;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "blogsmith.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Overrides the output directory from the configuration
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Overrides the base path links are generated under
    #[arg(short, long)]
    base_path: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let mut config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blogsmith --help");
            bail!("No usable configuration");
        }
    };

    if let Some(output_dir) = args.output_dir {
        config.paths.output_dir = PathBuf::from(output_dir);
    }
    if let Some(base_path) = args.base_path {
        config.site.base_path = base_path;
    }

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Building {} =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-", config.site.title);
    info!("Reading posts from {}", config.paths.posts_dir.display());

    match build_site(&config) {
        Ok(report) => {
            for link in report.malformed.iter() {
                warn!("Post {} is malformed and was replaced by a placeholder", link);
            }
            info!("Done. {} page(s) in {}", report.pages_written, config.paths.output_dir.display());
            Ok(())
        }
        Err(err) => {
            error!("Build failed: {:#}", err);
            Err(err)
        }
    }
}
