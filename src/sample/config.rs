//! YAML configuration for sampling defaults.
//!
//! Every key is optional; command-line flags take precedence over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults loaded from `--config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SampleFileConfig {
    /// Number of records to sample
    pub count: Option<usize>,
    /// Fixed random seed
    pub seed: Option<i64>,
    /// Use NUL instead of newline as the record delimiter
    pub nul_delimiter: Option<bool>,
    /// Buffer output writes
    pub buffered: Option<bool>,
}

impl SampleFileConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("unable to read config {}: {}", path.display(), e))?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
    }

    pub fn parse(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
count: 100
seed: 42
nul_delimiter: true
buffered: false
"#;

        let config = SampleFileConfig::parse(yaml).unwrap();

        assert_eq!(config.count, Some(100));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.nul_delimiter, Some(true));
        assert_eq!(config.buffered, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let config = SampleFileConfig::parse("count: 3\n").unwrap();
        assert_eq!(config.count, Some(3));
        assert_eq!(config.seed, None);
        assert_eq!(config.nul_delimiter, None);
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(SampleFileConfig::parse("").unwrap(), SampleFileConfig::default());
    }

    #[test]
    fn test_negative_seed_accepted() {
        let config = SampleFileConfig::parse("seed: -3\n").unwrap();
        assert_eq!(config.seed, Some(-3));
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(SampleFileConfig::parse("count: -5\n").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(SampleFileConfig::parse("limit: 5\n").is_err());
    }
}
