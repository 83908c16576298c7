//! Replay Configuration
//!
//! Chosen by the surrounding engine and applied to every event it builds.

use super::error::{ReplayError, ReplayResult};
use serde::{Deserialize, Serialize};

/// Default number of operations folded into one compute sub-event
pub const DEFAULT_COMPUTE_GRANULE: u64 = 1;

/// Capacity policy of a sub-event queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueCapacity {
    /// At most this many sub-events; exceeding it is a configuration error
    Fixed(usize),
    /// Grows with demand
    #[default]
    Growable,
}

impl QueueCapacity {
    /// Upper bound, `None` when growable
    #[inline]
    pub const fn limit(self) -> Option<usize> {
        match self {
            QueueCapacity::Fixed(n) => Some(n),
            QueueCapacity::Growable => None,
        }
    }
}

/// Configuration for event construction and decomposition
///
/// # Example
///
/// ```rust
/// use synchro_replay::domain::{QueueCapacity, ReplayConfig};
///
/// let config = ReplayConfig::from_json_str(r#"{ "queue_capacity": { "fixed": 64 } }"#).unwrap();
/// assert_eq!(config.queue_capacity, QueueCapacity::Fixed(64));
/// assert_eq!(config.compute_granule, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Capacity policy for every event's sub-event queue
    pub queue_capacity: QueueCapacity,
    /// Maximum IOPS (or FLOPS) carried by one compute sub-event
    pub compute_granule: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            queue_capacity: QueueCapacity::Growable,
            compute_granule: DEFAULT_COMPUTE_GRANULE,
        }
    }
}

impl ReplayConfig {
    /// Check value ranges
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a zero granule or a zero fixed capacity.
    pub fn validate(&self) -> ReplayResult<()> {
        if self.compute_granule == 0 {
            return Err(ReplayError::InvalidConfig(
                "compute_granule must be at least 1".into(),
            ));
        }
        if self.queue_capacity == QueueCapacity::Fixed(0) {
            return Err(ReplayError::InvalidConfig(
                "fixed queue capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the text does not parse or fails [`validate`](Self::validate).
    pub fn from_json_str(text: &str) -> ReplayResult<Self> {
        let config: ReplayConfig =
            serde_json::from_str(text).map_err(|e| ReplayError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReplayConfig::default();
        assert_eq!(config.queue_capacity, QueueCapacity::Growable);
        assert_eq!(config.compute_granule, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_defaults_missing_fields() {
        let config = ReplayConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ReplayConfig::default());

        let config = ReplayConfig::from_json_str(r#"{ "compute_granule": 16 }"#).unwrap();
        assert_eq!(config.compute_granule, 16);
        assert_eq!(config.queue_capacity, QueueCapacity::Growable);
    }

    #[test]
    fn test_rejects_zero_values() {
        let zero_granule = ReplayConfig {
            compute_granule: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_granule.validate(),
            Err(ReplayError::InvalidConfig(_))
        ));

        let result = ReplayConfig::from_json_str(r#"{ "queue_capacity": { "fixed": 0 } }"#);
        assert!(matches!(result, Err(ReplayError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = ReplayConfig::from_json_str(r#"{ "queue_capacity": "bounded" }"#);
        assert!(matches!(result, Err(ReplayError::InvalidConfig(_))));
    }

    #[test]
    fn test_capacity_limit() {
        assert_eq!(QueueCapacity::Fixed(8).limit(), Some(8));
        assert_eq!(QueueCapacity::Growable.limit(), None);
    }
}
