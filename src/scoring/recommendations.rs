use crate::models::{RiskFinding, RuleId};

pub const ALL_CLEAR: &str = "✅ Generally safe to interact";
pub const ANALYSIS_UNAVAILABLE: &str =
    "⛔ Unable to verify this token; avoid interacting until analysis succeeds";

/// Finding id → recommendation, in priority order.
const TABLE: &[(RuleId, &str)] = &[
    (RuleId::ConfirmedHoneypot, "🚫 Do not purchase — token cannot be sold"),
    (RuleId::NotAContract, "🚫 Do not send funds — address is not a token contract"),
    (RuleId::HighSellTax, "💸 Expect a large loss when selling; verify the sell tax before buying"),
    (RuleId::HighBuyTax, "💸 Account for the buy tax before purchasing"),
    (RuleId::HolderConcentration, "🐋 Beware of whale dumps — supply is concentrated in a few wallets"),
    (RuleId::ProxyPlusUnverified, "🔍 Avoid unverified upgradeable contracts unless the team is trusted"),
    (RuleId::UnverifiedContract, "📝 Prefer tokens with verified source code"),
    (RuleId::LowLiquidity, "💧 Trade small amounts only — liquidity is thin"),
    (RuleId::NotErc20Compliant, "⚙️ Check wallet and DEX compatibility — token is not ERC20 compliant"),
    (RuleId::FailedCheck, "⚙️ Review the failed on-chain checks before interacting"),
    (RuleId::HighTransferTax, "💸 Wallet-to-wallet transfers are taxed"),
    (RuleId::ProxyContract, "🔍 Monitor for contract upgrades — logic can change"),
    (RuleId::LowHolderCount, "👥 Very few holders; treat as an early or illiquid token"),
];

/// Recommendations for a finding set: most severe first, then table order,
/// at most `max` entries.
pub fn recommend(findings: &[RiskFinding], max: usize) -> Vec<String> {
    if findings.is_empty() {
        return vec![ALL_CLEAR.to_string()];
    }

    let mut ranked: Vec<(std::cmp::Reverse<_>, usize, &str)> = TABLE
        .iter()
        .enumerate()
        .filter_map(|(position, (id, text))| {
            findings
                .iter()
                .filter(|f| f.id == *id)
                .map(|f| f.severity)
                .max()
                .map(|severity| (std::cmp::Reverse(severity), position, *text))
        })
        .collect();

    ranked.sort();
    ranked
        .into_iter()
        .take(max)
        .map(|(_, _, text)| text.to_string())
        .collect()
}
