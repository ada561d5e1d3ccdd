use crate::display;
use anyhow::{bail, Context, Result};
use clap::Args;
use nodematch_core::{AttributeMatchConfig, AttributeSet, Node};
use nodematch_rule_engine::AttributeMatchEnhancer;
use std::fs;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule text, or @path to read it from a file
    #[arg(long)]
    rules: String,

    /// Node attribute as key=value (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Attributes to add, in Java Properties format (or @path)
    #[arg(long)]
    add: Option<String>,

    /// Comma separated tags to add
    #[arg(long)]
    tags: Option<String>,

    /// Expand ${name} placeholders in added attributes and tags
    #[arg(long)]
    substitute: bool,
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let config = AttributeMatchConfig {
        match_rules: read_text_arg(&args.rules)?,
        add: args.add.as_deref().map(read_text_arg).transpose()?,
        add_tags: args.tags,
        enable_substitution: args.substitute,
    };
    let enhancer = AttributeMatchEnhancer::new(&config).context("Invalid rule configuration")?;

    let malformed = enhancer.rules().malformed_lines();
    if !malformed.is_empty() {
        display::print_malformed_lines(&config.match_rules, malformed);
    }

    let attributes: AttributeSet = args.attributes.into_iter().collect();
    let mut node = Node {
        name: "check".to_string(),
        attributes,
        ..Default::default()
    };
    let before = node.clone();
    let outcome = enhancer.enhance(&mut node);

    display::print_check(&before, &node, outcome);
    Ok(())
}

/// `@path` reads the file, anything else is taken literally
fn read_text_arg(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))
        }
        None => Ok(value.to_string()),
    }
}

fn parse_attribute(value: &str) -> Result<(String, String)> {
    let Some((key, val)) = value.split_once('=') else {
        bail!("expected KEY=VALUE, got '{}'", value);
    };
    if key.is_empty() {
        bail!("attribute name is empty in '{}'", value);
    }
    Ok((key.to_string(), val.to_string()))
}
