//! Attribute-match enhancer - applies compiled rules to nodes
//!
//! Everything derived from the configuration (rule set, attribute and tag
//! templates) is built once in [`AttributeMatchEnhancer::new`] and never
//! changes afterwards, so one enhancer can be shared across threads.

use crate::built_in::ATTRIBUTE_MATCH_PROVIDER;
use crate::generator::{AttributeTemplates, TagTemplates};
use crate::matcher::RuleSet;
use crate::Result;
use nodematch_core::{AttributeMatchConfig, AttributeSet, Node, NodeEnhancer};

/// The attribute-match enhancer
#[derive(Debug, Clone)]
pub struct AttributeMatchEnhancer {
    rules: RuleSet,
    attributes: AttributeTemplates,
    tags: TagTemplates,
    enable_substitution: bool,
}

/// What happened to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// Rules did not match; the node was not touched
    Skipped,
    /// Rules matched and the generated attributes and tags were merged
    Enriched { attributes: usize, tags: usize },
}

impl AttributeMatchEnhancer {
    /// Compile an enhancer from its configuration
    ///
    /// Fails on invalid `=~` / `!~` patterns and on unparseable properties
    /// text. Malformed rule lines are not an error: the enhancer is built
    /// and simply never matches.
    pub fn new(config: &AttributeMatchConfig) -> Result<Self> {
        let rules = RuleSet::parse(&config.match_rules)?;
        let attributes = AttributeTemplates::parse(config.add.as_deref())?;
        let tags = TagTemplates::parse(config.add_tags.as_deref());

        tracing::debug!(
            keys = rules.keys().count(),
            attributes = attributes.len(),
            tags = tags.len(),
            substitution = config.enable_substitution,
            "compiled attribute-match enhancer"
        );

        Ok(Self {
            rules,
            attributes,
            tags,
            enable_substitution: config.enable_substitution,
        })
    }

    /// Compile an enhancer from a JSON configuration section
    pub fn from_json(value: &serde_json::Value) -> nodematch_core::Result<Self> {
        let config: AttributeMatchConfig = serde_json::from_value(value.clone())?;
        Ok(Self::new(&config)?)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Check whether a node's attributes satisfy the rules
    pub fn evaluate(&self, attributes: &AttributeSet) -> bool {
        self.rules.matches(attributes)
    }

    /// Evaluate the node and, if it matches, merge the generated attributes
    /// and tags into it
    ///
    /// Placeholders are expanded against the attributes as they were before
    /// this call, so generated values cannot refer to one another.
    pub fn enhance(&self, node: &mut Node) -> EnhanceOutcome {
        if !self.evaluate(&node.attributes) {
            tracing::debug!(node = node.name.as_str(), "rules did not match, skipping");
            return EnhanceOutcome::Skipped;
        }

        let attributes = self.attributes.render(self.enable_substitution, &node.attributes);
        let tags = self.tags.render(self.enable_substitution, &node.attributes);
        let outcome = EnhanceOutcome::Enriched {
            attributes: attributes.len(),
            tags: tags.len(),
        };

        node.merge_attributes(attributes);
        node.add_tags(tags);

        tracing::debug!(node = node.name.as_str(), ?outcome, "node enriched");
        outcome
    }
}

impl NodeEnhancer for AttributeMatchEnhancer {
    fn provider(&self) -> &str {
        ATTRIBUTE_MATCH_PROVIDER
    }

    fn update_node(&self, _project: &str, node: &mut Node) -> nodematch_core::Result<()> {
        self.enhance(node);
        Ok(())
    }
}
