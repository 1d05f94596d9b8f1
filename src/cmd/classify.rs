use anyhow::Result;
use serde::Serialize;

use second_brain::site::{self, PlatformTag};

use super::output::Output;

#[derive(Serialize)]
struct Classified<'a> {
    url: &'a str,
    platform: PlatformTag,
}

pub fn cmd_classify(urls: &[String], out: &Output) -> Result<()> {
    let results: Vec<Classified<'_>> = urls
        .iter()
        .map(|url| Classified {
            url,
            platform: site::classify(Some(url)),
        })
        .collect();

    if out.is_json() {
        return out.json(&results);
    }
    for result in &results {
        println!("{}\t{}", result.platform, result.url);
    }
    Ok(())
}
