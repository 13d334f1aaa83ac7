//! Live configuration snapshot.

use serde::{Deserialize, Serialize};

/// Immutable configuration value fetched once, mid-sequence.
///
/// Created by the configuration-fetch step and read-only thereafter.
/// The orchestrator does not persist it; ownership of persistence
/// belongs to the configuration service. Unknown upstream fields are
/// ignored and missing sections fall back to defaults so a partially
/// rolled-out configuration never blocks a boot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Parameters consumed by the daily-leaderboard cache warm-up.
    #[serde(default)]
    pub daily_leaderboards: DailyLeaderboardsConfig,
}

/// Daily-leaderboard cache warm-up parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLeaderboardsConfig {
    /// Whether the daily-leaderboard cache is active at all.
    #[serde(default)]
    pub enabled: bool,

    /// Maximum number of entries kept per daily leaderboard.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Hours until a daily leaderboard expires from the cache.
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u32,
}

const fn default_max_results() -> u32 {
    250
}

const fn default_expiry_hours() -> u32 {
    36
}

impl Default for DailyLeaderboardsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_results: default_max_results(),
            expiry_hours: default_expiry_hours(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let snapshot: ConfigurationSnapshot = serde_json::from_str("{}").unwrap();
        assert!(!snapshot.daily_leaderboards.enabled);
        assert_eq!(snapshot.daily_leaderboards.max_results, 250);
    }

    #[test]
    fn unknown_upstream_fields_are_ignored() {
        let raw = r#"{
            "daily_leaderboards": { "enabled": true, "max_results": 100 },
            "ads": { "enabled": false }
        }"#;
        let snapshot: ConfigurationSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.daily_leaderboards.enabled);
        assert_eq!(snapshot.daily_leaderboards.max_results, 100);
        assert_eq!(snapshot.daily_leaderboards.expiry_hours, 36);
    }
}
