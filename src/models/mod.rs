pub mod finding;
pub mod source;
pub mod analysis;

pub use finding::{Category, RiskFinding, RuleId, Severity};
pub use source::{
    CheckOutcome, HoneypotSourceRecord, NamedCheck, OnchainSourceRecord, SourceAvailability,
    SourceKind,
};
pub use analysis::{Breakdown, RiskLabel, RiskLevel, Verdict};
