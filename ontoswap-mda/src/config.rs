//! Generator configuration.

use crate::errors::{MdaError, MdaResult};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the default span distance.
pub const SPAN_DISTANCE_ENV: &str = "SPAN_DISTANCE";

/// Settings applied to every generated span rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum number of filler tokens allowed between span terms.
    pub span_distance: usize,
    /// Content terms may follow the anchor.
    pub forward: bool,
    /// Content terms may precede the anchor.
    pub reverse: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            span_distance: 4,
            forward: true,
            reverse: true,
        }
    }
}

impl GeneratorConfig {
    /// Defaults, with `span_distance` taken from `SPAN_DISTANCE` when set.
    pub fn from_env() -> MdaResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, with `span_distance` taken from whatever `lookup` returns
    /// for `SPAN_DISTANCE`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MdaResult<Self> {
        match lookup(SPAN_DISTANCE_ENV) {
            Some(raw) => Ok(Self::default().with_span_distance(parse_span_distance(&raw)?)),
            None => Ok(Self::default()),
        }
    }

    pub fn with_span_distance(mut self, span_distance: usize) -> Self {
        self.span_distance = span_distance;
        self
    }

    pub fn with_forward(mut self, forward: bool) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Reject settings that would produce rules no input can satisfy.
    pub fn validate(&self) -> MdaResult<()> {
        if self.span_distance == 0 {
            return Err(MdaError::InvalidConfig {
                field: "span_distance",
                message: "must be a positive number of tokens".into(),
            });
        }
        if !self.forward && !self.reverse {
            return Err(MdaError::InvalidConfig {
                field: "forward",
                message: "at least one of `forward` or `reverse` must be enabled".into(),
            });
        }
        Ok(())
    }
}

fn parse_span_distance(raw: &str) -> MdaResult<usize> {
    let value: i64 = raw.trim().parse().map_err(|_| MdaError::InvalidConfig {
        field: "span_distance",
        message: format!("`{}` is not an integer", raw),
    })?;
    if value <= 0 {
        return Err(MdaError::InvalidConfig {
            field: "span_distance",
            message: format!("must be positive, got {}", value),
        });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.span_distance, 4);
        assert!(config.forward);
        assert!(config.reverse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_distance_values() {
        assert_eq!(parse_span_distance("7").unwrap(), 7);
        assert_eq!(parse_span_distance(" 2 ").unwrap(), 2);
        assert!(matches!(
            parse_span_distance("0"),
            Err(MdaError::InvalidConfig { field: "span_distance", .. })
        ));
        assert!(parse_span_distance("-3").is_err());
        assert!(parse_span_distance("four").is_err());
    }

    #[test]
    fn distance_from_lookup() {
        let config = GeneratorConfig::from_lookup(|key| {
            (key == SPAN_DISTANCE_ENV).then(|| "2".to_string())
        })
        .unwrap();
        assert_eq!(config, GeneratorConfig::default().with_span_distance(2));

        assert_eq!(
            GeneratorConfig::from_lookup(|_| None).unwrap(),
            GeneratorConfig::default()
        );
        assert!(GeneratorConfig::from_lookup(|_| Some("0".into())).is_err());
    }

    #[test]
    fn zero_distance_is_invalid() {
        let config = GeneratorConfig::default().with_span_distance(0);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration for `span_distance`: must be a positive number of tokens"
        );
    }

    #[test]
    fn direction_must_be_enabled() {
        let config = GeneratorConfig::default()
            .with_forward(false)
            .with_reverse(false);
        assert!(config.validate().is_err());
    }
}
