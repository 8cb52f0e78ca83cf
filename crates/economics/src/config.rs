//! User storage plan.

use serde::{Deserialize, Serialize};

/// Default planned capacity in GB (GiB-based).
pub const DEFAULT_STORAGE_CAPACITY_GB: u64 = 150;

/// Default number of days of storage to keep paid ahead.
pub const DEFAULT_PERSISTENCE_PERIOD_DAYS: u64 = 365;

/// Default runway below which the plan is flagged as insufficient.
pub const DEFAULT_MIN_DAYS_THRESHOLD: u64 = 50;

/// Errors from [`UserConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Capacity must be at least 1 GB.
    #[error("storage capacity must be positive")]
    ZeroCapacity,

    /// Persistence period must be at least one day.
    #[error("persistence period must be positive")]
    ZeroPersistence,

    /// Threshold must be at least one day.
    #[error("minimum days threshold must be positive")]
    ZeroThreshold,
}

/// A user's storage plan, passed explicitly to every calculation.
///
/// Missing fields deserialize to their defaults individually, so a partially
/// written config file still yields a usable plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Planned capacity in GB, where 1 GB is 1024³ bytes.
    pub storage_capacity: u64,

    /// Days of storage to keep paid ahead.
    pub persistence_period: u64,

    /// Runway in days below which the plan needs action.
    pub min_days_threshold: u64,

    /// Whether new datasets use the CDN.
    pub with_cdn: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            storage_capacity: DEFAULT_STORAGE_CAPACITY_GB,
            persistence_period: DEFAULT_PERSISTENCE_PERIOD_DAYS,
            min_days_threshold: DEFAULT_MIN_DAYS_THRESHOLD,
            with_cdn: true,
        }
    }
}

impl UserConfig {
    /// Reject plans the calculator would treat as degenerate.
    ///
    /// A threshold above the persistence period is accepted; with such a plan
    /// the calculator can report a negative deposit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.persistence_period == 0 {
            return Err(ConfigError::ZeroPersistence);
        }
        if self.min_days_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// Apply a partial update.
    pub fn merge(self, patch: UserConfigPatch) -> Self {
        Self {
            storage_capacity: patch.storage_capacity.unwrap_or(self.storage_capacity),
            persistence_period: patch.persistence_period.unwrap_or(self.persistence_period),
            min_days_threshold: patch.min_days_threshold.unwrap_or(self.min_days_threshold),
            with_cdn: patch.with_cdn.unwrap_or(self.with_cdn),
        }
    }
}

/// Partial update to a [`UserConfig`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserConfigPatch {
    pub storage_capacity: Option<u64>,
    pub persistence_period: Option<u64>,
    pub min_days_threshold: Option<u64>,
    pub with_cdn: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UserConfig::default();
        assert_eq!(config.storage_capacity, 150);
        assert_eq!(config.persistence_period, 365);
        assert_eq!(config.min_days_threshold, 50);
        assert!(config.with_cdn);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = UserConfig { storage_capacity: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));

        let config = UserConfig { persistence_period: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPersistence));

        let config = UserConfig { min_days_threshold: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreshold));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let merged = UserConfig::default().merge(UserConfigPatch {
            storage_capacity: Some(500),
            with_cdn: Some(false),
            ..Default::default()
        });
        assert_eq!(merged.storage_capacity, 500);
        assert_eq!(merged.persistence_period, 365);
        assert_eq!(merged.min_days_threshold, 50);
        assert!(!merged.with_cdn);
    }

    #[test]
    fn test_partial_toml_falls_back_per_field() {
        let config: UserConfig = toml::from_str("persistence_period = 30").unwrap();
        assert_eq!(config.persistence_period, 30);
        assert_eq!(config.storage_capacity, DEFAULT_STORAGE_CAPACITY_GB);
        assert_eq!(config.min_days_threshold, DEFAULT_MIN_DAYS_THRESHOLD);
    }
}
