//! Attributes and tags generated for matching nodes
//!
//! Both generators split the configured text once into templates; rendering
//! a template against a node's attributes only performs substitution.

use crate::properties::parse_properties;
use crate::substitution::substitute;
use crate::Result;
use nodematch_core::{AttributeSet, TagSet};

/// Parsed attributes-to-add, values still unexpanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTemplates {
    entries: AttributeSet,
}

impl AttributeTemplates {
    /// Parse Java Properties text. `None` or blank text yields no entries.
    pub fn parse(add_text: Option<&str>) -> Result<Self> {
        let entries = match add_text {
            Some(text) if !text.trim().is_empty() => parse_properties(text)?.into_iter().collect(),
            _ => AttributeSet::new(),
        };
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce the attributes to add, expanding `${name}` in values from
    /// `attributes` when `enable_substitution` is set.
    pub fn render(&self, enable_substitution: bool, attributes: &AttributeSet) -> AttributeSet {
        if !enable_substitution {
            return self.entries.clone();
        }

        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), substitute(attributes, value)))
            .collect()
    }
}

/// Parsed tags-to-add, tokens still unexpanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTemplates {
    tokens: Vec<String>,
}

impl TagTemplates {
    /// Split comma separated text, trimming each token and dropping empties.
    pub fn parse(tag_text: Option<&str>) -> Self {
        let tokens: Vec<String> = tag_text
            .map(|text| {
                text.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Produce the tags to add.
    ///
    /// A token that expands to nothing is not added.
    pub fn render(&self, enable_substitution: bool, attributes: &AttributeSet) -> TagSet {
        self.tokens
            .iter()
            .map(|token| {
                if enable_substitution {
                    substitute(attributes, token)
                } else {
                    token.clone()
                }
            })
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Parse `add_text` as Java Properties text and expand placeholders in the
/// values when `enable_substitution` is set.
pub fn generate_attributes(
    add_text: Option<&str>,
    enable_substitution: bool,
    attributes: &AttributeSet,
) -> Result<AttributeSet> {
    Ok(AttributeTemplates::parse(add_text)?.render(enable_substitution, attributes))
}

/// Split `tag_text` on commas and expand placeholders in each tag when
/// `enable_substitution` is set.
pub fn generate_tags(
    tag_text: Option<&str>,
    enable_substitution: bool,
    attributes: &AttributeSet,
) -> TagSet {
    TagTemplates::parse(tag_text).render(enable_substitution, attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tags(items: &[&str]) -> TagSet {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_attributes_with_substitution() {
        let generated = generate_attributes(Some("k=${x}"), true, &attrs(&[("x", "v")])).unwrap();
        assert_eq!(generated, attrs(&[("k", "v")]));
    }

    #[test]
    fn test_attributes_without_substitution_are_literal() {
        let generated = generate_attributes(Some("k=${x}"), false, &attrs(&[("x", "v")])).unwrap();
        assert_eq!(generated, attrs(&[("k", "${x}")]));
    }

    #[test]
    fn test_keys_are_not_substituted() {
        let generated =
            generate_attributes(Some("${x}=${x}"), true, &attrs(&[("x", "v")])).unwrap();
        assert_eq!(generated, attrs(&[("${x}", "v")]));
    }

    #[test]
    fn test_empty_attribute_text() {
        assert!(generate_attributes(None, true, &attrs(&[])).unwrap().is_empty());
        assert!(generate_attributes(Some(""), true, &attrs(&[])).unwrap().is_empty());
        assert!(generate_attributes(Some("  \n "), true, &attrs(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let generated = generate_attributes(Some("a=1\na=2"), false, &attrs(&[])).unwrap();
        assert_eq!(generated, attrs(&[("a", "2")]));
    }

    #[test]
    fn test_malformed_properties_is_an_error() {
        assert!(generate_attributes(Some("k=\\uZZZZ"), false, &attrs(&[])).is_err());
    }

    #[test]
    fn test_tags_trimmed_and_empties_dropped() {
        assert_eq!(generate_tags(Some("a, b ,,c"), false, &attrs(&[])), tags(&["a", "b", "c"]));
    }

    #[test]
    fn test_tags_deduplicated() {
        assert_eq!(generate_tags(Some("web,web, web"), false, &attrs(&[])), tags(&["web"]));
    }

    #[test]
    fn test_empty_tag_text() {
        assert!(generate_tags(None, true, &attrs(&[])).is_empty());
        assert!(generate_tags(Some(""), true, &attrs(&[])).is_empty());
        assert!(generate_tags(Some(" , ,"), true, &attrs(&[])).is_empty());
    }

    #[test]
    fn test_tags_with_substitution() {
        let a = attrs(&[("env", "prod"), ("region", "eu-west-1")]);
        assert_eq!(
            generate_tags(Some("${env}, region-${region}, ${missing}"), true, &a),
            tags(&["prod", "region-eu-west-1"])
        );
        assert_eq!(
            generate_tags(Some("${env}"), false, &a),
            tags(&["${env}"])
        );
    }

    #[test]
    fn test_templates_render_per_node() {
        let templates = AttributeTemplates::parse(Some("owner=${team}")).unwrap();
        assert_eq!(templates.len(), 1);

        assert_eq!(
            templates.render(true, &attrs(&[("team", "infra")])),
            attrs(&[("owner", "infra")])
        );
        assert_eq!(
            templates.render(true, &attrs(&[("team", "data")])),
            attrs(&[("owner", "data")])
        );
    }
}
