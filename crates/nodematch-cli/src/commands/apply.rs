use crate::display;
use crate::OutputFormat;
use anyhow::{Context, Result};
use nodematch_config::{ConfigLoader, Pipeline};
use nodematch_core::Node;
use std::fs;
use std::path::Path;

pub fn run_apply(nodes_path: &Path, config_path: &Path, project: &str, format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;
    let pipeline = Pipeline::build(&config, &super::built_in_registry())
        .with_context(|| format!("Invalid config '{}'", config_path.display()))?;

    let mut nodes = read_nodes(nodes_path)?;
    tracing::debug!(nodes = nodes.len(), enhancers = pipeline.len(), "applying pipeline");
    let before = nodes.clone();
    let stats = pipeline
        .apply(project, &mut nodes)
        .context("Failed to apply enhancers")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
        OutputFormat::Human => display::print_nodes(&before, &nodes, &stats),
    }

    Ok(())
}

fn read_nodes(path: &Path) -> Result<Vec<Node>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read nodes from '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("'{}' is not a JSON array of nodes", path.display()))
}
