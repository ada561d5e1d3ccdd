//! nodematch Rule Engine - attribute matching and node enrichment
//!
//! This crate implements the attribute-match enhancer: a small rule language
//! that decides whether a node qualifies, plus the generators that produce
//! the attributes and tags added to qualifying nodes.
//!
//! # Architecture
//!
//! - **Rule Parser / Matcher**: one `key operator value` rule per line,
//!   rules on the same key are AND-ed, any malformed line fails closed
//! - **Substitution**: single-pass `${name}` expansion from node attributes
//! - **Generators**: Java Properties text for attributes, comma separated
//!   text for tags
//! - **Enhancer**: compiles a config once, then enriches any number of nodes
//!
//! # Example
//!
//! ```
//! use nodematch_core::{AttributeMatchConfig, Node};
//! use nodematch_rule_engine::AttributeMatchEnhancer;
//!
//! let config = AttributeMatchConfig::new("env==prod\nregion=~eu-.*")
//!     .with_add("tier=web\nzone=${region}")
//!     .with_add_tags("prod, web")
//!     .with_substitution(true);
//!
//! let enhancer = AttributeMatchEnhancer::new(&config)?;
//! let mut node = Node::new("web-01")
//!     .with_attribute("env", "prod")
//!     .with_attribute("region", "eu-west-1");
//!
//! enhancer.enhance(&mut node);
//! assert_eq!(node.attribute("zone"), Some("eu-west-1"));
//! assert!(node.tags.contains("web"));
//! # Ok::<(), nodematch_rule_engine::RuleError>(())
//! ```

pub mod built_in;
pub mod constants;
pub mod engine;
pub mod generator;
pub mod matcher;
pub mod properties;
pub mod rule;
pub mod substitution;

// Re-export core types
pub use built_in::{register_built_in, ATTRIBUTE_MATCH_PROVIDER};
pub use constants::*;
pub use engine::{AttributeMatchEnhancer, EnhanceOutcome};
pub use generator::{generate_attributes, generate_tags, AttributeTemplates, TagTemplates};
pub use matcher::{matches, RuleSet};
pub use properties::parse_properties;
pub use rule::{Condition, Operator, RuleLine};
pub use substitution::substitute;

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RuleError>;

/// Error types for rule engine
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid properties at line {line}: {message}")]
    PropertiesParse { line: usize, message: String },
}

impl From<RuleError> for nodematch_core::Error {
    fn from(err: RuleError) -> Self {
        nodematch_core::Error::Enhancer {
            provider: ATTRIBUTE_MATCH_PROVIDER.to_string(),
            source: Box::new(err),
        }
    }
}
