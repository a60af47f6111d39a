use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding. Declaration order is the ranking used when
/// sorting warnings, so `Critical` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "ℹ️",
        }
    }
}

/// Risk category. Declaration order breaks ties between findings of equal
/// severity in the warning list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Tax,
    Centralization,
    Technical,
    Verification,
    Honeypot,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tax,
        Category::Centralization,
        Category::Technical,
        Category::Verification,
        Category::Honeypot,
    ];
}

/// Stable identifier of the rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    ConfirmedHoneypot,
    HighSellTax,
    HighBuyTax,
    HighTransferTax,
    HolderConcentration,
    LowHolderCount,
    UnverifiedContract,
    ProxyContract,
    ProxyPlusUnverified,
    LowLiquidity,
    NotAContract,
    NotErc20Compliant,
    FailedCheck,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ConfirmedHoneypot => "CONFIRMED_HONEYPOT",
            RuleId::HighSellTax => "HIGH_SELL_TAX",
            RuleId::HighBuyTax => "HIGH_BUY_TAX",
            RuleId::HighTransferTax => "HIGH_TRANSFER_TAX",
            RuleId::HolderConcentration => "HOLDER_CONCENTRATION",
            RuleId::LowHolderCount => "LOW_HOLDER_COUNT",
            RuleId::UnverifiedContract => "UNVERIFIED_CONTRACT",
            RuleId::ProxyContract => "PROXY_CONTRACT",
            RuleId::ProxyPlusUnverified => "PROXY_PLUS_UNVERIFIED",
            RuleId::LowLiquidity => "LOW_LIQUIDITY",
            RuleId::NotAContract => "NOT_A_CONTRACT",
            RuleId::NotErc20Compliant => "NOT_ERC20_COMPLIANT",
            RuleId::FailedCheck => "FAILED_CHECK",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered risk rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub id: RuleId,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub weight: u32,
}

impl RiskFinding {
    pub fn new(
        id: RuleId,
        severity: Severity,
        category: Category,
        weight: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            severity,
            category,
            message: message.into(),
            weight,
        }
    }

    pub fn critical(id: RuleId, category: Category, weight: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Critical, category, weight, message)
    }

    pub fn warning(id: RuleId, category: Category, weight: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Warning, category, weight, message)
    }

    pub fn info(id: RuleId, category: Category, weight: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Info, category, weight, message)
    }
}
