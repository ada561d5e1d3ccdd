//! Error types for nodematch core.

use thiserror::Error;

/// Result type for nodematch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running enhancers.
#[derive(Debug, Error)]
pub enum Error {
    /// No enhancer factory is registered under this provider name.
    #[error("Unknown enhancer provider: {provider}")]
    UnknownProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// An enhancer failed while building or updating a node.
    #[error("Enhancer error ({provider}): {source}")]
    Enhancer {
        /// Provider name of the failing enhancer.
        provider: String,
        /// The underlying error reported by the enhancer.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Enhancer config section does not deserialize.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
