pub mod loader;
pub mod pipeline;
pub mod types;

pub use loader::{validate, ConfigError, ConfigLoader, MAX_CONFIG_FILE_SIZE};
pub use pipeline::{Pipeline, PipelineStats};
pub use types::{EnhancerEntry, PipelineConfig, CONFIG_VERSION};
