//! Risk rule set.
//!
//! Each rule is a pure function over whichever source records are present and
//! returns a finding only when it can positively evaluate its condition. An
//! unknown input field means the rule stays silent.

mod honeypot;
mod onchain;

use crate::config::{ScoringConfig, TieredThreshold};
use crate::models::{
    Category, HoneypotSourceRecord, OnchainSourceRecord, RiskFinding, RuleId,
};

/// Ordered collection of every rule, parameterized by the scoring config.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    config: ScoringConfig,
}

impl RuleSet {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run every rule in a fixed order. The returned vector is in discovery
    /// order and is what the aggregator uses to break warning-sort ties.
    pub fn evaluate(
        &self,
        honeypot: Option<&HoneypotSourceRecord>,
        onchain: Option<&OnchainSourceRecord>,
    ) -> Vec<RiskFinding> {
        let cfg = &self.config;
        let mut findings = Vec::new();

        if let Some(hp) = honeypot {
            findings.extend(honeypot::confirmed_honeypot(cfg, hp));
        }

        // A non-contract address makes the rest of the on-chain record meaningless.
        let contract = match onchain {
            Some(oc) if !oc.is_contract => {
                findings.push(onchain::not_a_contract(cfg));
                None
            }
            other => other,
        };

        if let Some(hp) = honeypot {
            findings.extend(honeypot::high_sell_tax(cfg, hp));
            findings.extend(honeypot::high_buy_tax(cfg, hp));
            findings.extend(honeypot::high_transfer_tax(cfg, hp));
            findings.extend(honeypot::holder_concentration(cfg, hp));
            findings.extend(honeypot::low_holder_count(cfg, hp));
            findings.extend(honeypot::unverified_contract(cfg, hp));
            findings.extend(honeypot::proxy_contract(cfg, hp));
            findings.extend(honeypot::low_liquidity(cfg, hp));
        }

        if let Some(oc) = contract {
            findings.extend(onchain::not_erc20_compliant(cfg, oc));
            findings.extend(onchain::failed_checks(cfg, oc));
        }

        for finding in &findings {
            tracing::debug!(
                "Rule {} triggered: {:?} weight={}",
                finding.id,
                finding.severity,
                finding.weight
            );
        }

        findings
    }
}

/// Shared evaluation of a two-tier "greater than" threshold.
fn tiered(
    id: RuleId,
    category: Category,
    threshold: &TieredThreshold,
    value: Option<f64>,
    describe: impl Fn(f64) -> String,
) -> Option<RiskFinding> {
    let value = value?;
    if value > threshold.critical_above {
        Some(RiskFinding::critical(id, category, threshold.critical_weight, describe(value)))
    } else if value > threshold.warning_above {
        Some(RiskFinding::warning(id, category, threshold.warning_weight, describe(value)))
    } else {
        None
    }
}
