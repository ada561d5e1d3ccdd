//! nodematch Core - node model and enhancer abstraction.
//!
//! This crate provides the foundational types shared by every nodematch
//! crate:
//!
//! - [`Node`]: a managed host with an attribute map and a tag set
//! - [`AttributeMatchConfig`]: the configuration of one attribute-match enhancer
//! - [`NodeEnhancer`]: trait for anything that mutates nodes in place
//! - [`EnhancerRegistry`]: lookup of enhancer factories by provider name
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │    nodematch-cli     │  (User interface)
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │   nodematch-config   │  (Pipeline configuration)
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │nodematch-rule-engine │  (Matching, substitution, generation)
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │   nodematch-core     │  (This crate - node model and traits)
//! └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use nodematch_core::Node;
//!
//! let node = Node::new("web-01")
//!     .with_attribute("env", "prod")
//!     .with_tag("linux");
//!
//! assert_eq!(node.attribute("env"), Some("prod"));
//! assert!(node.tags.contains("linux"));
//! ```

pub mod enhancer;
pub mod error;
pub mod types;

// Re-export core types for convenience
pub use enhancer::{EnhancerFactory, EnhancerRegistry, NodeEnhancer};
pub use error::{Error, Result};
pub use types::{AttributeMatchConfig, AttributeSet, Node, TagSet};
