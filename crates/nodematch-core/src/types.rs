//! Node model and enhancer configuration types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A node's attributes: unique names mapped to string values.
pub type AttributeSet = BTreeMap<String, String>;

/// A node's tags. Enhancers only ever add to it.
pub type TagSet = BTreeSet<String>;

/// A managed host: a name, its attributes and its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node name (hostname or inventory identifier)
    pub name: String,

    /// Current attributes
    #[serde(default)]
    pub attributes: AttributeSet,

    /// Current tags
    #[serde(default)]
    pub tags: TagSet,
}

impl Node {
    /// Creates a node with no attributes or tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style tag setter.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Looks up a single attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Merges attributes into the node. Existing keys are overwritten.
    pub fn merge_attributes(&mut self, attributes: AttributeSet) {
        self.attributes.extend(attributes);
    }

    /// Adds tags to the node. Tags are never removed.
    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = String>) {
        self.tags.extend(tags);
    }
}

/// Configuration for one attribute-match enhancer.
///
/// Mirrors the four inputs a host hands the enhancer: the rule text, the
/// attributes to add (Java Properties format), the tags to add (comma
/// separated) and whether `${name}` placeholders are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMatchConfig {
    /// Newline separated rule lines, e.g. `env==prod`
    #[serde(rename = "match")]
    pub match_rules: String,

    /// Attributes to add, in Java Properties format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<String>,

    /// Comma separated tags to add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tags: Option<String>,

    /// Expand `${name}` placeholders in added values and tags
    #[serde(default)]
    pub enable_substitution: bool,
}

impl AttributeMatchConfig {
    /// Creates a config with only match rules set.
    pub fn new(match_rules: impl Into<String>) -> Self {
        Self {
            match_rules: match_rules.into(),
            ..Default::default()
        }
    }

    pub fn with_add(mut self, add: impl Into<String>) -> Self {
        self.add = Some(add.into());
        self
    }

    pub fn with_add_tags(mut self, add_tags: impl Into<String>) -> Self {
        self.add_tags = Some(add_tags.into());
        self
    }

    pub fn with_substitution(mut self, enabled: bool) -> Self {
        self.enable_substitution = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_existing_keys() {
        let mut node = Node::new("web-01")
            .with_attribute("env", "dev")
            .with_attribute("os", "linux");

        let mut added = AttributeSet::new();
        added.insert("env".to_string(), "prod".to_string());
        added.insert("tier".to_string(), "web".to_string());
        node.merge_attributes(added);

        assert_eq!(node.attribute("env"), Some("prod"));
        assert_eq!(node.attribute("os"), Some("linux"));
        assert_eq!(node.attribute("tier"), Some("web"));
    }

    #[test]
    fn test_add_tags_is_a_union() {
        let mut node = Node::new("web-01").with_tag("linux");
        node.add_tags(vec!["linux".to_string(), "prod".to_string()]);

        assert_eq!(node.tags.len(), 2);
        assert!(node.tags.contains("prod"));
    }

    #[test]
    fn test_node_deserializes_without_tags() {
        let node: Node =
            serde_json::from_str(r#"{"name": "db-01", "attributes": {"env": "prod"}}"#).unwrap();

        assert_eq!(node.name, "db-01");
        assert_eq!(node.attribute("env"), Some("prod"));
        assert!(node.tags.is_empty());
    }

    #[test]
    fn test_config_uses_match_key() {
        let config: AttributeMatchConfig = serde_json::from_str(
            r#"{"match": "env==prod", "add_tags": "web", "enable_substitution": true}"#,
        )
        .unwrap();

        assert_eq!(config.match_rules, "env==prod");
        assert_eq!(config.add, None);
        assert_eq!(config.add_tags.as_deref(), Some("web"));
        assert!(config.enable_substitution);
    }
}
