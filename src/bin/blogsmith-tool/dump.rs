use std::fs;

use blogsmith::content::raw_post::RawPost;
use blogsmith::markup::inline::{InlinePass, PASS_ORDER};
use blogsmith::markup::transform_with;

use crate::DumpArgs;

fn parse_passes(passes: Option<&str>) -> Result<Vec<InlinePass>, String> {
    match passes {
        None => Ok(PASS_ORDER.to_vec()),
        Some(list) => list.split(',')
            .filter(|x| !x.trim().is_empty())
            .map(|x| x.parse())
            .collect(),
    }
}

fn dump_post(content: &str, passes: &[InlinePass]) -> anyhow::Result<String> {
    let raw = RawPost::parse(content)?;
    let nodes = transform_with(&raw.body, passes)?;
    Ok(serde_json::to_string_pretty(&nodes)?)
}

pub fn dump_cmd(args: DumpArgs) {
    let passes = match parse_passes(args.passes.as_deref()) {
        Ok(passes) => passes,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let content = match fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.file, e);
            return;
        }
    };

    match dump_post(&content, &passes) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error parsing {}: {}", args.file, e),
    }
}
