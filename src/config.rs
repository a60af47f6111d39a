//! Runtime configuration.
//!
//! Every threshold and weight used by the rule set and the scoring function
//! lives in [`ScoringConfig`]. Defaults are the production constants; a TOML
//! file may override any subset of them.

use crate::utils::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub sources: SourcesConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.scoring.validate()?;
        Ok(config)
    }
}

/// Two-tier threshold: strictly above `critical_above` is CRITICAL, strictly
/// above `warning_above` is WARNING.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieredThreshold {
    pub critical_above: f64,
    pub critical_weight: u32,
    pub warning_above: f64,
    pub warning_weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub honeypot_weight: u32,
    pub sell_tax: TieredThreshold,
    pub buy_tax: TieredThreshold,
    pub transfer_tax_warning_above: f64,
    pub transfer_tax_weight: u32,
    pub holder_concentration: TieredThreshold,
    pub min_holder_count: u64,
    pub low_holder_count_weight: u32,
    pub unverified_weight: u32,
    pub proxy_weight: u32,
    pub proxy_unverified_weight: u32,
    pub min_liquidity_usd: f64,
    pub low_liquidity_weight: u32,
    pub not_a_contract_weight: u32,
    pub not_erc20_weight: u32,
    pub failed_check_weight: u32,
    pub failed_checks_weight_cap: u32,

    /// Findings at or above this weight in HONEYPOT/TECHNICAL are sentinels.
    pub sentinel_weight: u32,
    /// Highest score a sentinel verdict may carry.
    pub sentinel_score_ceiling: u8,

    pub safe_min_score: u8,
    pub low_risk_min_score: u8,
    pub medium_risk_min_score: u8,
    pub high_risk_min_score: u8,

    pub missing_honeypot_penalty: f64,
    pub missing_onchain_penalty: f64,
    pub min_confidence: f64,

    pub max_recommendations: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            honeypot_weight: 100,
            sell_tax: TieredThreshold {
                critical_above: 10.0,
                critical_weight: 25,
                warning_above: 5.0,
                warning_weight: 10,
            },
            buy_tax: TieredThreshold {
                critical_above: 10.0,
                critical_weight: 20,
                warning_above: 5.0,
                warning_weight: 8,
            },
            transfer_tax_warning_above: 10.0,
            transfer_tax_weight: 10,
            holder_concentration: TieredThreshold {
                critical_above: 70.0,
                critical_weight: 20,
                warning_above: 50.0,
                warning_weight: 10,
            },
            min_holder_count: 50,
            low_holder_count_weight: 5,
            unverified_weight: 10,
            proxy_weight: 5,
            proxy_unverified_weight: 15,
            min_liquidity_usd: 1_000.0,
            low_liquidity_weight: 10,
            not_a_contract_weight: 100,
            not_erc20_weight: 10,
            failed_check_weight: 5,
            failed_checks_weight_cap: 20,
            sentinel_weight: 100,
            sentinel_score_ceiling: 5,
            safe_min_score: 90,
            low_risk_min_score: 70,
            medium_risk_min_score: 40,
            high_risk_min_score: 15,
            missing_honeypot_penalty: 0.4,
            missing_onchain_penalty: 0.3,
            min_confidence: 0.1,
            max_recommendations: 5,
        }
    }
}

impl ScoringConfig {
    /// Reject values the scoring function cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(CheckError::InvalidConfig(msg));

        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return invalid(format!("min_confidence must be in (0, 1], got {}", self.min_confidence));
        }
        for (name, penalty) in [
            ("missing_honeypot_penalty", self.missing_honeypot_penalty),
            ("missing_onchain_penalty", self.missing_onchain_penalty),
        ] {
            if !(0.0..=1.0).contains(&penalty) {
                return invalid(format!("{} must be in [0, 1], got {}", name, penalty));
            }
        }

        let breakpoints = [
            self.safe_min_score,
            self.low_risk_min_score,
            self.medium_risk_min_score,
            self.high_risk_min_score,
        ];
        if self.safe_min_score > 100 || breakpoints.windows(2).any(|w| w[0] < w[1]) {
            return invalid(format!(
                "risk breakpoints must descend from at most 100, got {:?}",
                breakpoints
            ));
        }
        if self.sentinel_score_ceiling > 100 {
            return invalid(format!(
                "sentinel_score_ceiling must be at most 100, got {}",
                self.sentinel_score_ceiling
            ));
        }

        for (name, tier) in [
            ("sell_tax", &self.sell_tax),
            ("buy_tax", &self.buy_tax),
            ("holder_concentration", &self.holder_concentration),
        ] {
            if !(tier.warning_above <= tier.critical_above) {
                return invalid(format!("{}: warning_above exceeds critical_above", name));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub honeypot_api_url: String,
    pub timeout_secs: u64,
    /// Per-chain RPC URL overrides, keyed by decimal chain id.
    pub rpc_urls: BTreeMap<String, String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            honeypot_api_url: "https://api.honeypot.is".to_string(),
            timeout_secs: 15,
            rpc_urls: BTreeMap::new(),
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// RPC URL for a chain: explicit override first, then the public default.
    pub fn rpc_url(&self, chain_id: u64) -> Option<String> {
        self.rpc_urls
            .get(&chain_id.to_string())
            .cloned()
            .or_else(|| chains::find(chain_id).map(|c| c.default_rpc.to_string()))
    }
}

pub mod chains {
    /// A chain the checker knows how to inspect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Chain {
        pub id: u64,
        pub name: &'static str,
        pub default_rpc: &'static str,
    }

    pub const SUPPORTED: &[Chain] = &[
        Chain { id: 1, name: "Ethereum", default_rpc: "https://eth.llamarpc.com" },
        Chain { id: 56, name: "BSC", default_rpc: "https://bsc-dataseed1.binance.org" },
        Chain { id: 137, name: "Polygon", default_rpc: "https://polygon-rpc.com" },
        Chain { id: 42161, name: "Arbitrum", default_rpc: "https://arb1.arbitrum.io/rpc" },
        Chain { id: 10, name: "Optimism", default_rpc: "https://mainnet.optimism.io" },
        Chain { id: 8453, name: "Base", default_rpc: "https://mainnet.base.org" },
        Chain { id: 43114, name: "Avalanche", default_rpc: "https://api.avax.network/ext/bc/C/rpc" },
    ];

    pub fn find(chain_id: u64) -> Option<&'static Chain> {
        SUPPORTED.iter().find(|c| c.id == chain_id)
    }

    pub fn is_supported(chain_id: u64) -> bool {
        find(chain_id).is_some()
    }

    pub fn name(chain_id: u64) -> &'static str {
        find(chain_id).map(|c| c.name).unwrap_or("Unknown")
    }

    pub fn supported_ids() -> Vec<u64> {
        SUPPORTED.iter().map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [scoring]
            min_liquidity_usd = 5000.0

            [sources]
            timeout_secs = 3

            [sources.rpc_urls]
            "1" = "http://localhost:8545"
            "#,
        )
        .unwrap();

        assert_eq!(config.scoring.min_liquidity_usd, 5000.0);
        assert_eq!(config.scoring.sell_tax.critical_weight, 25);
        assert_eq!(config.sources.timeout(), Duration::from_secs(3));
        assert_eq!(config.sources.rpc_url(1).as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.sources.rpc_url(8453).as_deref(), Some("https://mainnet.base.org"));
    }

    #[test]
    fn test_default_scoring_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad = [
            "[scoring]\nmin_confidence = 1.5",
            "[scoring]\nmin_confidence = 0.0",
            "[scoring]\nmissing_onchain_penalty = -0.2",
            "[scoring]\nsentinel_score_ceiling = 101",
            "[scoring]\nlow_risk_min_score = 95",
            "[scoring]\nsafe_min_score = 120",
            "[scoring.sell_tax]\ncritical_above = 5.0\ncritical_weight = 25\nwarning_above = 10.0\nwarning_weight = 10",
        ];
        for raw in bad {
            let err = Config::from_toml(raw).unwrap_err();
            assert!(matches!(err, CheckError::InvalidConfig(_)), "{}: {}", raw, err);
        }
    }

    #[test]
    fn test_chain_table() {
        assert!(chains::is_supported(56));
        assert!(!chains::is_supported(369));
        assert_eq!(chains::name(42161), "Arbitrum");
        assert_eq!(chains::name(999), "Unknown");
        assert_eq!(chains::supported_ids().len(), 7);
    }
}
