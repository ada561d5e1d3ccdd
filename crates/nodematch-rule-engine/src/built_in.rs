//! Built-in enhancer providers

use crate::engine::AttributeMatchEnhancer;
use nodematch_core::{EnhancerRegistry, NodeEnhancer};

/// Provider name of the attribute-match enhancer
pub const ATTRIBUTE_MATCH_PROVIDER: &str = "attribute-match";

/// Register every enhancer this crate provides
pub fn register_built_in(registry: &mut EnhancerRegistry) {
    registry.register(
        ATTRIBUTE_MATCH_PROVIDER,
        Box::new(
            |config: &serde_json::Value| -> nodematch_core::Result<Box<dyn NodeEnhancer>> {
                Ok(Box::new(AttributeMatchEnhancer::from_json(config)?))
            },
        ),
    );
}
