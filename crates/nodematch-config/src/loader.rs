use crate::types::{PipelineConfig, CONFIG_VERSION};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum size for a pipeline config file (1MB)
///
/// Config files hold a handful of enhancers. Anything larger is almost
/// certainly the wrong file.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576; // 1MB

/// Errors that can occur while loading or building a pipeline
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file {path} is {size} bytes, max allowed is {max_allowed}")]
    ConfigTooLarge {
        path: PathBuf,
        size: u64,
        max_allowed: u64,
    },

    #[error("Unsupported config version {found}, expected {expected}")]
    UnsupportedVersion { found: String, expected: String },

    #[error("Enhancer #{index} has an empty provider name")]
    MissingProvider { index: usize },

    #[error("Enhancer '{name}' is defined more than once")]
    DuplicateName { name: String },

    #[error("Enhancer '{name}' failed to build: {source}")]
    Enhancer {
        name: String,
        #[source]
        source: nodematch_core::Error,
    },
}

/// Loads `nodematch.toml` files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config file name, looked up in the working directory
    pub const DEFAULT_FILE_NAME: &'static str = "nodematch.toml";

    /// Load and validate config from a specific path
    pub fn load_from(path: &Path) -> Result<PipelineConfig, ConfigError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::ConfigTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max_allowed: MAX_CONFIG_FILE_SIZE,
            });
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            enhancers = config.enhancers.len(),
            "loaded pipeline config"
        );
        Ok(config)
    }

    /// Parse and validate config text
    pub fn parse(contents: &str) -> Result<PipelineConfig, ConfigError> {
        let config: PipelineConfig = toml::from_str(contents)?;
        validate(&config)?;
        Ok(config)
    }
}

/// Check the parts of a config that do not depend on any provider
pub fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: config.version.clone(),
            expected: CONFIG_VERSION.to_string(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for (index, entry) in config.enhancers.iter().enumerate() {
        if entry.provider.trim().is_empty() {
            return Err(ConfigError::MissingProvider { index: index + 1 });
        }

        let name = entry.display_name(index);
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateName { name });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
        [[enhancers]]
        provider = "attribute-match"
        name = "tag prod"

        [enhancers.config]
        match = "env==prod"
        add_tags = "prod"
    "#;

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(ConfigLoader::DEFAULT_FILE_NAME);
        fs::write(&path, VALID).unwrap();

        let config = ConfigLoader::load_from(&path).unwrap();
        assert_eq!(config.enhancers.len(), 1);
        assert_eq!(config.enhancers[0].provider, "attribute-match");
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = ConfigLoader::load_from(&temp.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("huge.toml");
        let padding = "# padding\n".repeat((MAX_CONFIG_FILE_SIZE as usize / 10) + 1);
        fs::write(&path, padding).unwrap();

        let result = ConfigLoader::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ConfigTooLarge { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let result = ConfigLoader::parse("[[enhancers]\nprovider =");
        assert!(matches!(result, Err(ConfigError::TomlDe(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let result = ConfigLoader::parse("version = \"2.0\"");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_empty_provider() {
        let result = ConfigLoader::parse("[[enhancers]]\nprovider = \" \"");
        assert!(matches!(result, Err(ConfigError::MissingProvider { index: 1 })));
    }

    #[test]
    fn test_duplicate_names() {
        let text = r#"
            [[enhancers]]
            provider = "attribute-match"
            name = "same"
            [[enhancers]]
            provider = "attribute-match"
            name = "same"
        "#;

        let result = ConfigLoader::parse(text);
        assert!(matches!(result, Err(ConfigError::DuplicateName { .. })));
    }

    #[test]
    fn test_explicit_name_collides_with_generated_name() {
        let text = r#"
            [[enhancers]]
            provider = "attribute-match"
            name = "attribute-match#2"
            [[enhancers]]
            provider = "attribute-match"
        "#;

        match ConfigLoader::parse(text) {
            Err(ConfigError::DuplicateName { name }) => assert_eq!(name, "attribute-match#2"),
            other => panic!("expected duplicate name, got {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_entries_are_distinct() {
        let text = r#"
            [[enhancers]]
            provider = "attribute-match"
            [[enhancers]]
            provider = "attribute-match"
        "#;

        assert!(ConfigLoader::parse(text).is_ok());
    }
}
