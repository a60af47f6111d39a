//! Weighted-deduction scoring with sentinel overrides.
//!
//! The score starts at 100 and loses each finding's weight. Catastrophic
//! findings (confirmed honeypot, non-contract address) are sentinels: they pin
//! the verdict to the CRITICAL bucket and cap the score no matter how benign
//! the remaining signals look.

pub mod aggregator;
pub mod recommendations;

pub use aggregator::{aggregate, Aggregator};

use crate::config::ScoringConfig;
use crate::models::{Category, RiskFinding, RiskLevel, RuleId, SourceAvailability};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub safety_score: u8,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub is_honeypot: bool,
}

pub fn score(findings: &[RiskFinding], availability: SourceAvailability, cfg: &ScoringConfig) -> Score {
    let deduction = findings
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.weight));
    let mut safety_score = 100u32.saturating_sub(deduction).min(100) as u8;

    let sentinel = findings.iter().any(|f| is_sentinel(f, cfg));
    if sentinel {
        safety_score = safety_score.min(cfg.sentinel_score_ceiling);
    }

    let risk_level = if sentinel {
        RiskLevel::Critical
    } else {
        risk_level_for(safety_score, cfg)
    };

    let is_honeypot = findings
        .iter()
        .any(|f| matches!(f.id, RuleId::ConfirmedHoneypot | RuleId::NotAContract));

    Score {
        safety_score,
        risk_level,
        confidence: confidence(availability, cfg),
        is_honeypot,
    }
}

pub fn is_sentinel(finding: &RiskFinding, cfg: &ScoringConfig) -> bool {
    matches!(finding.category, Category::Honeypot | Category::Technical)
        && finding.weight >= cfg.sentinel_weight
}

pub fn risk_level_for(score: u8, cfg: &ScoringConfig) -> RiskLevel {
    if score >= cfg.safe_min_score {
        RiskLevel::Safe
    } else if score >= cfg.low_risk_min_score {
        RiskLevel::LowRisk
    } else if score >= cfg.medium_risk_min_score {
        RiskLevel::MediumRisk
    } else if score >= cfg.high_risk_min_score {
        RiskLevel::HighRisk
    } else {
        RiskLevel::Critical
    }
}

/// Evidence completeness, in `[min_confidence, 1.0]`, two decimals.
pub fn confidence(availability: SourceAvailability, cfg: &ScoringConfig) -> f64 {
    if availability.none_available() {
        return cfg.min_confidence;
    }

    let mut value = 1.0;
    if !availability.honeypot {
        value -= cfg.missing_honeypot_penalty;
    }
    if !availability.onchain {
        value -= cfg.missing_onchain_penalty;
    }

    // Unvalidated configs reach here too; clamp() would panic on min > max.
    round2(value.max(cfg.min_confidence).min(1.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn finding(id: RuleId, category: Category, weight: u32) -> RiskFinding {
        RiskFinding::new(id, Severity::Warning, category, weight, "test")
    }

    #[test]
    fn test_no_findings_is_perfect() {
        let cfg = ScoringConfig::default();
        let s = score(&[], SourceAvailability::both(), &cfg);
        assert_eq!(s.safety_score, 100);
        assert_eq!(s.risk_level, RiskLevel::Safe);
        assert_eq!(s.confidence, 1.0);
        assert!(!s.is_honeypot);
    }

    #[test]
    fn test_single_high_sell_tax_is_low_risk_at_75() {
        let cfg = ScoringConfig::default();
        let findings = vec![RiskFinding::critical(RuleId::HighSellTax, Category::Tax, 25, "tax")];
        let s = score(&findings, SourceAvailability::both(), &cfg);
        assert_eq!(s.safety_score, 75);
        assert_eq!(s.risk_level, RiskLevel::LowRisk);
    }

    #[test]
    fn test_breakpoints() {
        let cfg = ScoringConfig::default();
        assert_eq!(risk_level_for(100, &cfg), RiskLevel::Safe);
        assert_eq!(risk_level_for(90, &cfg), RiskLevel::Safe);
        assert_eq!(risk_level_for(89, &cfg), RiskLevel::LowRisk);
        assert_eq!(risk_level_for(70, &cfg), RiskLevel::LowRisk);
        assert_eq!(risk_level_for(69, &cfg), RiskLevel::MediumRisk);
        assert_eq!(risk_level_for(40, &cfg), RiskLevel::MediumRisk);
        assert_eq!(risk_level_for(39, &cfg), RiskLevel::HighRisk);
        assert_eq!(risk_level_for(15, &cfg), RiskLevel::HighRisk);
        assert_eq!(risk_level_for(14, &cfg), RiskLevel::Critical);
        assert_eq!(risk_level_for(0, &cfg), RiskLevel::Critical);
    }

    #[test]
    fn test_sentinel_caps_score_and_forces_critical() {
        // Lowered sentinel weight so the ceiling, not the deduction, decides the score.
        let cfg = ScoringConfig {
            sentinel_weight: 50,
            ..ScoringConfig::default()
        };
        let findings = vec![finding(RuleId::NotAContract, Category::Technical, 50)];
        let s = score(&findings, SourceAvailability::both(), &cfg);
        assert_eq!(s.safety_score, 5);
        assert_eq!(s.risk_level, RiskLevel::Critical);
        assert!(s.is_honeypot);
    }

    #[test]
    fn test_heavy_tax_finding_is_not_a_sentinel() {
        let cfg = ScoringConfig::default();
        let heavy = finding(RuleId::HighSellTax, Category::Tax, 150);
        assert!(!is_sentinel(&heavy, &cfg));
        let s = score(&[heavy], SourceAvailability::both(), &cfg);
        assert_eq!(s.safety_score, 0);
        assert!(!s.is_honeypot);
    }

    #[test]
    fn test_confidence_penalties() {
        let cfg = ScoringConfig::default();
        let only_honeypot = SourceAvailability { honeypot: true, onchain: false };
        let only_onchain = SourceAvailability { honeypot: false, onchain: true };

        assert_eq!(confidence(SourceAvailability::both(), &cfg), 1.0);
        assert_eq!(confidence(only_honeypot, &cfg), 0.7);
        assert_eq!(confidence(only_onchain, &cfg), 0.6);
        assert_eq!(confidence(SourceAvailability::default(), &cfg), 0.1);
    }

    #[test]
    fn test_extreme_weights_saturate() {
        let cfg = ScoringConfig::default();
        let findings = vec![
            finding(RuleId::HighSellTax, Category::Tax, u32::MAX),
            finding(RuleId::HighBuyTax, Category::Tax, 20),
        ];
        let s = score(&findings, SourceAvailability::both(), &cfg);
        assert_eq!(s.safety_score, 0);
        assert_eq!(s.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_confidence_never_panics_on_unchecked_config() {
        let cfg = ScoringConfig {
            min_confidence: 1.5,
            ..ScoringConfig::default()
        };
        let only_honeypot = SourceAvailability { honeypot: true, onchain: false };
        assert_eq!(confidence(only_honeypot, &cfg), 1.0);
    }
}
