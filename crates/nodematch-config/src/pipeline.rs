//! Build enhancers from config and run them over nodes

use crate::loader::ConfigError;
use crate::types::PipelineConfig;
use nodematch_core::{EnhancerRegistry, Node, NodeEnhancer};

/// Enhancers compiled from a [`PipelineConfig`], in application order
#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<(String, Box<dyn NodeEnhancer>)>,
}

/// Statistics from running a pipeline
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub nodes_seen: usize,
    pub nodes_enriched: usize,
}

impl Pipeline {
    /// Compile every enabled enhancer in `config` through `registry`
    ///
    /// Configuration errors (unknown provider, invalid regex, unparseable
    /// properties) are reported with the enhancer's display name.
    pub fn build(config: &PipelineConfig, registry: &EnhancerRegistry) -> Result<Self, ConfigError> {
        let mut stages = Vec::new();

        for (index, entry) in config.enhancers.iter().enumerate() {
            let name = entry.display_name(index);
            if !entry.enabled {
                tracing::debug!(enhancer = name.as_str(), "enhancer disabled, skipping");
                continue;
            }

            let enhancer = entry
                .config_json()
                .map_err(nodematch_core::Error::from)
                .and_then(|json| registry.create(&entry.provider, &json))
                .map_err(|source| ConfigError::Enhancer {
                    name: name.clone(),
                    source,
                })?;

            stages.push((name, enhancer));
        }

        Ok(Self { stages })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the enabled enhancers, in order
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|(name, _)| name.as_str())
    }

    /// Apply every enhancer to every node, in configuration order
    ///
    /// Later enhancers see the attributes and tags added by earlier ones.
    pub fn apply(&self, project: &str, nodes: &mut [Node]) -> nodematch_core::Result<PipelineStats> {
        let mut stats = PipelineStats::default();

        for node in nodes.iter_mut() {
            stats.nodes_seen += 1;
            let before = node.clone();

            for (name, enhancer) in &self.stages {
                tracing::trace!(enhancer = name.as_str(), node = node.name.as_str(), "applying");
                enhancer.update_node(project, node)?;
            }

            if *node != before {
                stats.nodes_enriched += 1;
            }
        }

        tracing::debug!(?stats, "pipeline applied");
        Ok(stats)
    }
}
