use super::recommendations::{recommend, ANALYSIS_UNAVAILABLE};
use super::score;
use crate::config::ScoringConfig;
use crate::models::{
    Breakdown, Category, HoneypotSourceRecord, OnchainSourceRecord, RiskFinding, RiskLabel,
    RiskLevel, Severity, SourceAvailability, SourceKind, Verdict,
};
use crate::rules::RuleSet;
use std::collections::BTreeSet;

pub const ANALYSIS_INCOMPLETE: &str =
    "Analysis could not be completed: both data sources were unavailable";

/// Turns two resolved (or failed) source results into one verdict.
///
/// Stateless and deterministic: the same inputs always produce the same
/// verdict, and no input combination makes it fail.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    rules: RuleSet,
}

impl Aggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            rules: RuleSet::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.rules.config()
    }

    pub fn aggregate<E1, E2>(
        &self,
        honeypot: std::result::Result<HoneypotSourceRecord, E1>,
        onchain: std::result::Result<OnchainSourceRecord, E2>,
    ) -> Verdict {
        self.aggregate_records(honeypot.ok().as_ref(), onchain.ok().as_ref())
    }

    /// Same as [`Aggregator::aggregate`] with `None` marking an unavailable source.
    pub fn aggregate_records(
        &self,
        honeypot: Option<&HoneypotSourceRecord>,
        onchain: Option<&OnchainSourceRecord>,
    ) -> Verdict {
        let availability = SourceAvailability {
            honeypot: honeypot.is_some(),
            onchain: onchain.is_some(),
        };

        if availability.none_available() {
            return self.unavailable_verdict();
        }

        let cfg = self.config();
        let mut findings = self.rules.evaluate(honeypot, onchain);

        // Stable: equal keys keep discovery order.
        findings.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.category.cmp(&b.category))
        });

        let s = score(&findings, availability, cfg);

        let mut sources_checked = BTreeSet::new();
        if availability.honeypot {
            sources_checked.insert(SourceKind::Honeypot);
        }
        if availability.onchain {
            sources_checked.insert(SourceKind::Onchain);
        }

        Verdict {
            safety_score: s.safety_score,
            risk_level: s.risk_level,
            is_honeypot: s.is_honeypot,
            confidence: s.confidence,
            warnings: findings.iter().map(|f| f.message.clone()).collect(),
            recommendations: recommend(&findings, cfg.max_recommendations),
            sources_checked,
            breakdown: build_breakdown(&findings, availability, onchain),
            findings,
        }
    }

    fn unavailable_verdict(&self) -> Verdict {
        let cfg = self.config();
        Verdict {
            safety_score: 0,
            risk_level: RiskLevel::Critical,
            is_honeypot: false,
            confidence: cfg.min_confidence,
            warnings: vec![ANALYSIS_INCOMPLETE.to_string()],
            recommendations: vec![ANALYSIS_UNAVAILABLE.to_string()],
            sources_checked: BTreeSet::new(),
            breakdown: Breakdown::unknown(),
            findings: Vec::new(),
        }
    }
}

/// Aggregate with the default scoring configuration.
pub fn aggregate<E1, E2>(
    honeypot: std::result::Result<HoneypotSourceRecord, E1>,
    onchain: std::result::Result<OnchainSourceRecord, E2>,
) -> Verdict {
    Aggregator::default().aggregate(honeypot, onchain)
}

/// Source whose absence leaves a category unknown.
fn owning_source(category: Category) -> SourceKind {
    match category {
        Category::Technical => SourceKind::Onchain,
        Category::Tax | Category::Centralization | Category::Verification | Category::Honeypot => {
            SourceKind::Honeypot
        }
    }
}

fn build_breakdown(
    findings: &[RiskFinding],
    availability: SourceAvailability,
    onchain: Option<&OnchainSourceRecord>,
) -> Breakdown {
    let red_flags = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .count();

    let passed_basic_checks =
        red_flags == 0 && onchain.is_some_and(|oc| oc.is_contract && oc.is_erc20);

    let mut breakdown = Breakdown {
        red_flags,
        passed_basic_checks,
        ..Breakdown::unknown()
    };

    for category in Category::ALL {
        let worst = findings
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.severity)
            .max();

        let label = match worst {
            Some(severity) => RiskLabel::from(severity),
            None if availability.is_available(owning_source(category)) => RiskLabel::Low,
            None => RiskLabel::Unknown,
        };
        breakdown.set_label(category, label);
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckOutcome, NamedCheck, RuleId};

    fn clean_onchain() -> OnchainSourceRecord {
        OnchainSourceRecord {
            is_contract: true,
            is_erc20: true,
            code_size_bytes: 3_000,
            total_supply: "1000000".to_string(),
            decimals: Some(6),
            checks: vec![NamedCheck::new("has_transfer_function", CheckOutcome::Pass)],
            name: None,
            symbol: None,
        }
    }

    #[test]
    fn test_both_unavailable_is_terminal_critical() {
        let verdict = aggregate::<_, ()>(Err("timeout"), Err(()));
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert_eq!(verdict.safety_score, 0);
        assert_eq!(verdict.confidence, 0.1);
        assert_eq!(verdict.warnings, vec![ANALYSIS_INCOMPLETE.to_string()]);
        assert!(verdict.sources_checked.is_empty());
        assert_eq!(verdict.breakdown, Breakdown::unknown());
    }

    #[test]
    fn test_warning_order_severity_then_category_then_discovery() {
        let hp = HoneypotSourceRecord {
            contract_verified: Some(false),
            top10_holders_percent: Some(60.0),
            sell_tax_percent: Some(6.0),
            buy_tax_percent: Some(30.0),
            liquidity_usd: Some(10.0),
            ..Default::default()
        };
        let verdict = aggregate::<(), ()>(Ok(hp), Ok(clean_onchain()));
        let order: Vec<RuleId> = verdict.findings.iter().map(|f| f.id).collect();
        assert_eq!(
            order,
            vec![
                RuleId::HighBuyTax,
                RuleId::HighSellTax,
                RuleId::HolderConcentration,
                RuleId::LowLiquidity,
                RuleId::UnverifiedContract,
            ]
        );
        assert_eq!(verdict.warnings[0], "High buy tax: 30.0%");
    }

    #[test]
    fn test_breakdown_labels() {
        let hp = HoneypotSourceRecord {
            sell_tax_percent: Some(20.0),
            top10_holders_percent: Some(55.0),
            is_proxy: Some(true),
            ..Default::default()
        };
        let verdict = aggregate::<(), ()>(Ok(hp), Ok(clean_onchain()));
        let b = &verdict.breakdown;
        assert_eq!(b.tax, RiskLabel::High);
        assert_eq!(b.centralization, RiskLabel::Medium);
        assert_eq!(b.technical, RiskLabel::Low);
        assert_eq!(b.verification, RiskLabel::Low);
        assert_eq!(b.honeypot, RiskLabel::Low);
        assert_eq!(b.red_flags, 1);
        assert!(!b.passed_basic_checks);
    }

    #[test]
    fn test_honeypot_source_missing_leaves_its_categories_unknown() {
        let verdict = aggregate::<_, ()>(Err("down"), Ok(clean_onchain()));
        let b = &verdict.breakdown;
        assert_eq!(b.tax, RiskLabel::Unknown);
        assert_eq!(b.honeypot, RiskLabel::Unknown);
        assert_eq!(b.technical, RiskLabel::Low);
        assert!(b.passed_basic_checks);
        assert_eq!(verdict.confidence, 0.6);
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
    }
}
