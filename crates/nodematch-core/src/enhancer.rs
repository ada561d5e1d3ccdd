//! Node enhancer trait and registry.

use crate::error::{Error, Result};
use crate::types::Node;
use std::fmt;

/// Trait for components that enrich nodes in place.
///
/// An enhancer is built once from its configuration and then invoked for
/// every node. Implementations hold only immutable, pre-computed state.
///
/// # Thread Safety
///
/// Implementations must be Send + Sync so one enhancer can enrich many
/// nodes in parallel.
///
/// # Examples
///
/// ```no_run
/// use nodematch_core::{Node, NodeEnhancer};
///
/// fn enrich_all(enhancer: &dyn NodeEnhancer, nodes: &mut [Node]) {
///     for node in nodes {
///         if let Err(e) = enhancer.update_node("default", node) {
///             eprintln!("{} failed: {}", enhancer.provider(), e);
///         }
///     }
/// }
/// ```
pub trait NodeEnhancer: Send + Sync + fmt::Debug {
    /// Returns the provider name this enhancer was registered under.
    fn provider(&self) -> &str;

    /// Enriches a single node.
    ///
    /// # Errors
    ///
    /// Returns an error when the enhancer's configuration turns out to be
    /// unusable for this node. Nodes that simply do not qualify are left
    /// untouched and reported as `Ok(())`.
    fn update_node(&self, project: &str, node: &mut Node) -> Result<()>;
}

/// Builds an enhancer from its JSON configuration section.
pub type EnhancerFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<Box<dyn NodeEnhancer>> + Send + Sync>;

/// Registry of enhancer factories keyed by provider name.
#[derive(Default)]
pub struct EnhancerRegistry {
    factories: Vec<(String, EnhancerFactory)>,
}

impl EnhancerRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory. A later registration for the same provider
    /// replaces the earlier one.
    pub fn register(&mut self, provider: impl Into<String>, factory: EnhancerFactory) {
        let provider = provider.into();
        self.factories.retain(|(name, _)| *name != provider);
        self.factories.push((provider, factory));
    }

    /// Returns true if a factory is registered for the provider.
    pub fn contains(&self, provider: &str) -> bool {
        self.factories.iter().any(|(name, _)| name == provider)
    }

    /// Returns the registered provider names in registration order.
    pub fn providers(&self) -> Vec<&str> {
        self.factories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Builds an enhancer for the provider from its configuration.
    pub fn create(
        &self,
        provider: &str,
        config: &serde_json::Value,
    ) -> Result<Box<dyn NodeEnhancer>> {
        let (_, factory) = self
            .factories
            .iter()
            .find(|(name, _)| name == provider)
            .ok_or_else(|| Error::UnknownProvider {
                provider: provider.to_string(),
            })?;

        factory(config)
    }
}

impl fmt::Debug for EnhancerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancerRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
