pub mod config;
pub mod contracts;
pub mod core;
pub mod models;
pub mod rules;
pub mod scoring;
pub mod analyzers;
pub mod blockchain;
pub mod utils;

pub use core::{HoneypotSource, OnchainSource, TokenReport, TokenSafetyChecker};
pub use models::{
    Breakdown, Category, CheckOutcome, HoneypotSourceRecord, NamedCheck, OnchainSourceRecord,
    RiskFinding, RiskLabel, RiskLevel, RuleId, Severity, SourceAvailability, SourceKind, Verdict,
};
pub use rules::RuleSet;
pub use scoring::{aggregate, Aggregator};
pub use utils::{CheckError, Result};
