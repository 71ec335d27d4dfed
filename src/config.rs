//! Matcher configuration.

use crate::errors::{MatchError, MatchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bounds for one pipeline run.
///
/// ```
/// use ontoswap::MatcherConfig;
///
/// let config = MatcherConfig::from_toml_str("max_depth = 0").unwrap();
/// assert_eq!(config.max_depth, 0);
/// assert_eq!(config.max_gram_size, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Largest window the exact matcher tries, in tokens.
    pub max_gram_size: usize,
    /// Last convergence pass index; passes run from the caller's depth up to this.
    pub max_depth: usize,
    /// Window size used when filtering hierarchy candidates.
    pub hierarchy_window: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_gram_size: 10,
            max_depth: 2,
            hierarchy_window: 2,
        }
    }
}

impl MatcherConfig {
    pub fn from_toml_str(content: &str) -> MatchResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> MatchResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| MatchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_max_gram_size(mut self, max_gram_size: usize) -> Self {
        self.max_gram_size = max_gram_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hierarchy_window(mut self, hierarchy_window: usize) -> Self {
        self.hierarchy_window = hierarchy_window;
        self
    }

    pub fn validate(&self) -> MatchResult<()> {
        if self.max_gram_size == 0 {
            return Err(MatchError::InvalidConfig {
                field: "max_gram_size",
                message: "must be at least 1".into(),
            });
        }
        if self.hierarchy_window == 0 {
            return Err(MatchError::InvalidConfig {
                field: "hierarchy_window",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = MatcherConfig::from_toml_str("max_gram_size = 4\n").unwrap();
        assert_eq!(
            config,
            MatcherConfig {
                max_gram_size: 4,
                max_depth: 2,
                hierarchy_window: 2,
            }
        );
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = MatcherConfig::from_toml_str("hierarchy_window = 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration for `hierarchy_window`: must be at least 1"
        );
        assert!(MatcherConfig::default()
            .with_max_gram_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn malformed_toml() {
        let err = MatcherConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, MatchError::Toml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 1\nhierarchy_window = 3").unwrap();

        let config = MatcherConfig::load(file.path()).unwrap();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.hierarchy_window, 3);

        let missing = MatcherConfig::load(Path::new("/nonexistent/ontoswap.toml"));
        assert!(matches!(missing, Err(MatchError::Io { .. })));
    }
}
