use anyhow::{Context, Result};
use colored::*;
use nodematch_config::{ConfigLoader, Pipeline};
use std::path::Path;

pub fn run_validate(config_path: &Path) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;
    let pipeline = Pipeline::build(&config, &super::built_in_registry())
        .with_context(|| format!("Invalid config '{}'", config_path.display()))?;

    println!(
        "{} {} ({} enabled of {} enhancers)",
        "✓".green(),
        config_path.display(),
        pipeline.len(),
        config.enhancers.len()
    );
    for name in pipeline.stage_names() {
        println!("  {} {}", "•".cyan(), name);
    }

    Ok(())
}
