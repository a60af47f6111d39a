use crate::config::ScoringConfig;
use crate::models::{Category, OnchainSourceRecord, RiskFinding, RuleId};

pub(super) fn not_a_contract(cfg: &ScoringConfig) -> RiskFinding {
    RiskFinding::critical(
        RuleId::NotAContract,
        Category::Technical,
        cfg.not_a_contract_weight,
        "🚨 Address is not a contract (no deployed code)",
    )
}

pub(super) fn not_erc20_compliant(cfg: &ScoringConfig, oc: &OnchainSourceRecord) -> Option<RiskFinding> {
    debug_assert!(oc.is_contract, "ERC20 rule evaluated on a non-contract record");

    (oc.is_contract && !oc.is_erc20).then(|| {
        RiskFinding::warning(
            RuleId::NotErc20Compliant,
            Category::Technical,
            cfg.not_erc20_weight,
            "Contract does not implement the ERC20 interface",
        )
    })
}

/// One warning per failed sub-check; the combined weight never exceeds the cap.
pub(super) fn failed_checks(cfg: &ScoringConfig, oc: &OnchainSourceRecord) -> Vec<RiskFinding> {
    let mut remaining = cfg.failed_checks_weight_cap;

    oc.failed_checks()
        .map(|check| {
            let weight = cfg.failed_check_weight.min(remaining);
            remaining -= weight;
            RiskFinding::warning(
                RuleId::FailedCheck,
                Category::Technical,
                weight,
                format!("On-chain check failed: {}", check.name.replace('_', " ")),
            )
        })
        .collect()
}
