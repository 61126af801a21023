//! Config schema - Tunables for the sales workflow

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CustomerLevel;

/// Cumulative spend thresholds for the CRM tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Minimum total spend for vip
    #[serde(default = "default_vip")]
    pub vip: Decimal,

    /// Minimum total spend for vvip
    #[serde(default = "default_vvip")]
    pub vvip: Decimal,
}

fn default_vip() -> Decimal {
    Decimal::from(10_000)
}

fn default_vvip() -> Decimal {
    Decimal::from(30_000)
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            vip: default_vip(),
            vvip: default_vvip(),
        }
    }
}

impl TierThresholds {
    /// Tier for a total spend. No hysteresis: the result depends only on `total`.
    pub fn level_for(&self, total: Decimal) -> CustomerLevel {
        if total >= self.vvip {
            CustomerLevel::Vvip
        } else if total >= self.vip {
            CustomerLevel::Vip
        } else {
            CustomerLevel::General
        }
    }
}

/// Day windows for the recency-based member status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityWindows {
    #[serde(default = "default_hot_days")]
    pub hot_days: i64,

    #[serde(default = "default_warm_days")]
    pub warm_days: i64,

    #[serde(default = "default_cold_days")]
    pub cold_days: i64,
}

fn default_hot_days() -> i64 {
    30
}

fn default_warm_days() -> i64 {
    60
}

fn default_cold_days() -> i64 {
    90
}

impl Default for ActivityWindows {
    fn default() -> Self {
        ActivityWindows {
            hot_days: default_hot_days(),
            warm_days: default_warm_days(),
            cold_days: default_cold_days(),
        }
    }
}

/// Slip evidence lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipConfig {
    /// Upper bound for a single slip probe; a timeout counts as "absent"
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// File extensions tried, in order
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

impl Default for SlipConfig {
    fn default() -> Self {
        SlipConfig {
            probe_timeout_ms: default_probe_timeout_ms(),
            extensions: default_extensions(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub tiers: TierThresholds,

    #[serde(default)]
    pub activity: ActivityWindows,

    #[serde(default)]
    pub slips: SlipConfig,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            tiers: TierThresholds::default(),
            activity: ActivityWindows::default(),
            slips: SlipConfig::default(),
        }
    }
}

impl Config {
    /// Reject settings that would make tiers or windows overlap.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tiers.vip > self.tiers.vvip {
            return Err(format!(
                "tiers.vip ({}) must not exceed tiers.vvip ({})",
                self.tiers.vip, self.tiers.vvip
            ));
        }
        let a = &self.activity;
        if !(0 <= a.hot_days && a.hot_days <= a.warm_days && a.warm_days <= a.cold_days) {
            return Err(format!(
                "activity windows must satisfy 0 <= hot <= warm <= cold, got {}/{}/{}",
                a.hot_days, a.warm_days, a.cold_days
            ));
        }
        Ok(())
    }
}
