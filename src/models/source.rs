use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// Which upstream source contributed to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Honeypot,
    Onchain,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Honeypot => "honeypot.is",
            SourceKind::Onchain => "on-chain",
        }
    }
}

/// Which sources resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceAvailability {
    pub honeypot: bool,
    pub onchain: bool,
}

impl SourceAvailability {
    pub fn both() -> Self {
        Self { honeypot: true, onchain: true }
    }

    pub fn is_available(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Honeypot => self.honeypot,
            SourceKind::Onchain => self.onchain,
        }
    }

    pub fn none_available(&self) -> bool {
        !self.honeypot && !self.onchain
    }
}

/// Measurements from the honeypot simulation service.
///
/// Every `Option` is "unknown" when `None`; rules treat unknown as
/// "cannot evaluate" rather than as a safe or unsafe value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoneypotSourceRecord {
    pub buy_tax_percent: Option<f64>,
    pub sell_tax_percent: Option<f64>,
    pub transfer_tax_percent: Option<f64>,
    pub holder_count: Option<u64>,
    pub top10_holders_percent: Option<f64>,
    pub contract_verified: Option<bool>,
    pub is_proxy: Option<bool>,
    pub liquidity_usd: Option<f64>,
    pub is_honeypot: bool,
    pub honeypot_reason: Option<String>,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
}

impl HoneypotSourceRecord {
    /// True when the simulator flagged a honeypot but reported nothing to back it.
    pub fn is_unsupported_honeypot_flag(&self) -> bool {
        self.is_honeypot
            && self.honeypot_reason.is_none()
            && self.buy_tax_percent.is_none()
            && self.sell_tax_percent.is_none()
            && self.transfer_tax_percent.is_none()
    }
}

/// Outcome of one named on-chain sub-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Pass,
    Fail,
    Unknown,
}

impl From<Option<bool>> for CheckOutcome {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => CheckOutcome::Pass,
            Some(false) => CheckOutcome::Fail,
            None => CheckOutcome::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCheck {
    pub name: String,
    pub outcome: CheckOutcome,
}

impl NamedCheck {
    pub fn new(name: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }
}

/// Measurements from direct contract inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnchainSourceRecord {
    pub is_contract: bool,
    pub is_erc20: bool,
    pub code_size_bytes: u64,
    /// Decimal string so large supplies survive serialization untouched.
    pub total_supply: String,
    pub decimals: Option<u8>,
    #[serde(default)]
    pub checks: Vec<NamedCheck>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl OnchainSourceRecord {
    /// Record for an address with no deployed code.
    pub fn not_a_contract() -> Self {
        Self {
            is_contract: false,
            is_erc20: false,
            code_size_bytes: 0,
            total_supply: "0".to_string(),
            decimals: None,
            checks: Vec::new(),
            name: None,
            symbol: None,
        }
    }

    pub fn total_supply_u256(&self) -> Option<U256> {
        U256::from_dec_str(&self.total_supply).ok()
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &NamedCheck> {
        self.checks
            .iter()
            .filter(|check| check.outcome == CheckOutcome::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_supply_keeps_full_precision() {
        let record = OnchainSourceRecord {
            total_supply: "115792089237316195423570985008687907853269984665640564039457584007913129639935"
                .to_string(),
            ..OnchainSourceRecord::not_a_contract()
        };
        assert_eq!(record.total_supply_u256(), Some(U256::MAX));
    }

    #[test]
    fn test_unsupported_honeypot_flag() {
        let bare = HoneypotSourceRecord {
            is_honeypot: true,
            ..Default::default()
        };
        assert!(bare.is_unsupported_honeypot_flag());

        let with_reason = HoneypotSourceRecord {
            honeypot_reason: Some("cannot sell".into()),
            ..bare
        };
        assert!(!with_reason.is_unsupported_honeypot_flag());
    }

    #[test]
    fn test_check_outcome_from_tri_state() {
        assert_eq!(CheckOutcome::from(Some(true)), CheckOutcome::Pass);
        assert_eq!(CheckOutcome::from(Some(false)), CheckOutcome::Fail);
        assert_eq!(CheckOutcome::from(None), CheckOutcome::Unknown);
    }
}
