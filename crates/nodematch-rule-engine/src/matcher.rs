//! Compiled rule sets
//!
//! Rule text is parsed once into a [`RuleSet`]: every rule for the same key
//! is kept together and all of them must hold. Regex operands are compiled
//! up front so matching a node never allocates or fails.

use crate::rule::{Condition, RuleLine};
use crate::Result;
use nodematch_core::AttributeSet;
use std::collections::BTreeMap;

/// Rules grouped by attribute key, ready for matching
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Conditions per key, AND-ed together
    conditions: BTreeMap<String, Vec<Condition>>,

    /// 1-based numbers of lines that did not parse
    malformed_lines: Vec<usize>,
}

impl RuleSet {
    /// Parse and compile rule text
    ///
    /// Lines are separated by `\n` or `\r\n`; trailing empty lines are
    /// ignored, so empty text yields a set that matches every node. Lines
    /// that do not follow the grammar are recorded and make the whole set
    /// non-matching. Invalid regex operands are an error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rule_set = Self::default();

        for (index, line) in split_lines(text).into_iter().enumerate() {
            match RuleLine::parse(line) {
                Some(rule) => {
                    let condition = rule.compile()?;
                    rule_set
                        .conditions
                        .entry(rule.key)
                        .or_default()
                        .push(condition);
                }
                None => {
                    tracing::warn!(line = index + 1, text = line, "malformed match rule");
                    rule_set.malformed_lines.push(index + 1);
                }
            }
        }

        Ok(rule_set)
    }

    /// Returns true if every line parsed
    pub fn is_well_formed(&self) -> bool {
        self.malformed_lines.is_empty()
    }

    pub fn malformed_lines(&self) -> &[usize] {
        &self.malformed_lines
    }

    /// Returns true if there are no rules at all
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.malformed_lines.is_empty()
    }

    /// Keys referenced by the rules
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// Check attributes against the rules
    ///
    /// Returns `true` only if every line parsed AND every key's conditions
    /// hold. Short-circuits on the first failing key.
    pub fn matches(&self, attributes: &AttributeSet) -> bool {
        if !self.is_well_formed() {
            return false;
        }

        self.conditions.iter().all(|(key, conditions)| {
            let value = attributes.get(key).map(String::as_str);
            let holds = conditions.iter().all(|condition| condition.test(value));
            tracing::trace!(key = key.as_str(), ?value, holds, "rule key evaluated");
            holds
        })
    }
}

/// Parse `rule_text` and check `attributes` against it
///
/// Convenience for one-off checks; enhancers keep a compiled [`RuleSet`].
pub fn matches(attributes: &AttributeSet, rule_text: &str) -> Result<bool> {
    Ok(RuleSet::parse(rule_text)?.matches(attributes))
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
}
