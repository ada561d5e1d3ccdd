pub mod apply;
pub mod check;
pub mod validate;

pub use apply::run_apply;
pub use check::{run_check, CheckArgs};
pub use validate::run_validate;

use nodematch_core::EnhancerRegistry;

/// Registry with every enhancer shipped in this binary
pub(crate) fn built_in_registry() -> EnhancerRegistry {
    let mut registry = EnhancerRegistry::new();
    nodematch_rule_engine::register_built_in(&mut registry);
    registry
}
