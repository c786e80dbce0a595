//! Config command - validates a loop config file or prints the defaults

use anyhow::{Context, Result};
use looping_runtime::LoopConfig;
use std::path::Path;

pub fn run(path: Option<&str>, format: &str) -> Result<()> {
    let config = match path {
        Some(path) => LoopConfig::load(Path::new(path))
            .with_context(|| format!("Invalid config '{}'", path))?,
        None => LoopConfig::default(),
    };
    println!("{}", render(&config, format)?);
    Ok(())
}

fn render(config: &LoopConfig, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        _ => Ok(config.to_toml_string()?),
    }
}
