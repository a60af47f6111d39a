use super::tiered;
use crate::config::ScoringConfig;
use crate::models::{Category, HoneypotSourceRecord, RiskFinding, RuleId};

pub(super) fn confirmed_honeypot(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    if !hp.is_honeypot {
        return None;
    }

    if hp.is_unsupported_honeypot_flag() {
        tracing::debug!("Honeypot flag reported without a reason or tax data; keeping it");
    }

    let message = match hp.honeypot_reason.as_deref() {
        Some(reason) if !reason.trim().is_empty() => {
            format!("🚨 HONEYPOT DETECTED: {}", reason.trim())
        }
        _ => "🚨 HONEYPOT DETECTED: token cannot be sold".to_string(),
    };

    Some(RiskFinding::critical(
        RuleId::ConfirmedHoneypot,
        Category::Honeypot,
        cfg.honeypot_weight,
        message,
    ))
}

pub(super) fn high_sell_tax(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    tiered(
        RuleId::HighSellTax,
        Category::Tax,
        &cfg.sell_tax,
        hp.sell_tax_percent,
        |tax| format!("High sell tax: {:.1}%", tax),
    )
}

pub(super) fn high_buy_tax(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    tiered(
        RuleId::HighBuyTax,
        Category::Tax,
        &cfg.buy_tax,
        hp.buy_tax_percent,
        |tax| format!("High buy tax: {:.1}%", tax),
    )
}

pub(super) fn high_transfer_tax(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    let tax = hp.transfer_tax_percent?;
    (tax > cfg.transfer_tax_warning_above).then(|| {
        RiskFinding::warning(
            RuleId::HighTransferTax,
            Category::Tax,
            cfg.transfer_tax_weight,
            format!("High transfer tax: {:.1}%", tax),
        )
    })
}

pub(super) fn holder_concentration(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    tiered(
        RuleId::HolderConcentration,
        Category::Centralization,
        &cfg.holder_concentration,
        hp.top10_holders_percent,
        |pct| format!("Top 10 holders own {:.1}% of supply", pct),
    )
}

pub(super) fn low_holder_count(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    let holders = hp.holder_count?;
    (holders < cfg.min_holder_count).then(|| {
        RiskFinding::info(
            RuleId::LowHolderCount,
            Category::Centralization,
            cfg.low_holder_count_weight,
            format!("Only {} holders", holders),
        )
    })
}

pub(super) fn unverified_contract(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    (hp.contract_verified == Some(false)).then(|| {
        RiskFinding::warning(
            RuleId::UnverifiedContract,
            Category::Verification,
            cfg.unverified_weight,
            "Contract source code is not verified",
        )
    })
}

/// Proxy alone is informational; proxy on top of unverified source escalates
/// to a distinct warning instead of stacking both.
pub(super) fn proxy_contract(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    if hp.is_proxy != Some(true) {
        return None;
    }

    if hp.contract_verified == Some(false) {
        Some(RiskFinding::warning(
            RuleId::ProxyPlusUnverified,
            Category::Technical,
            cfg.proxy_unverified_weight,
            "Unverified proxy contract: logic can be swapped without visible source",
        ))
    } else {
        Some(RiskFinding::info(
            RuleId::ProxyContract,
            Category::Technical,
            cfg.proxy_weight,
            "Proxy contract: logic can be upgraded by the owner",
        ))
    }
}

pub(super) fn low_liquidity(cfg: &ScoringConfig, hp: &HoneypotSourceRecord) -> Option<RiskFinding> {
    let liquidity = hp.liquidity_usd?;
    (liquidity < cfg.min_liquidity_usd).then(|| {
        RiskFinding::warning(
            RuleId::LowLiquidity,
            Category::Technical,
            cfg.low_liquidity_weight,
            format!("Low liquidity: ${:.2}", liquidity),
        )
    })
}
