use super::finding::{Category, RiskFinding, Severity};
use super::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Categorical risk, ordered by ascending risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    LowRisk,
    MediumRisk,
    HighRisk,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::LowRisk => "LOW_RISK",
            RiskLevel::MediumRisk => "MEDIUM_RISK",
            RiskLevel::HighRisk => "HIGH_RISK",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "🟢",
            RiskLevel::LowRisk => "🔵",
            RiskLevel::MediumRisk => "🟡",
            RiskLevel::HighRisk => "🟠",
            RiskLevel::Critical => "🔴",
        }
    }
}

/// Per-category risk label shown in the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
    Unknown,
}

impl From<Severity> for RiskLabel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => RiskLabel::High,
            Severity::Warning => RiskLabel::Medium,
            Severity::Info => RiskLabel::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub tax: RiskLabel,
    pub centralization: RiskLabel,
    pub technical: RiskLabel,
    pub verification: RiskLabel,
    pub honeypot: RiskLabel,
    /// Number of CRITICAL findings.
    pub red_flags: usize,
    pub passed_basic_checks: bool,
}

impl Breakdown {
    pub fn unknown() -> Self {
        Self {
            tax: RiskLabel::Unknown,
            centralization: RiskLabel::Unknown,
            technical: RiskLabel::Unknown,
            verification: RiskLabel::Unknown,
            honeypot: RiskLabel::Unknown,
            red_flags: 0,
            passed_basic_checks: false,
        }
    }

    pub fn label(&self, category: Category) -> RiskLabel {
        match category {
            Category::Tax => self.tax,
            Category::Centralization => self.centralization,
            Category::Technical => self.technical,
            Category::Verification => self.verification,
            Category::Honeypot => self.honeypot,
        }
    }

    pub(crate) fn set_label(&mut self, category: Category, label: RiskLabel) {
        match category {
            Category::Tax => self.tax = label,
            Category::Centralization => self.centralization = label,
            Category::Technical => self.technical = label,
            Category::Verification => self.verification = label,
            Category::Honeypot => self.honeypot = label,
        }
    }
}

/// Final, immutable result of aggregating both sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub safety_score: u8,
    pub risk_level: RiskLevel,
    pub is_honeypot: bool,
    pub confidence: f64,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub sources_checked: BTreeSet<SourceKind>,
    pub breakdown: Breakdown,
    /// Findings in warning order.
    pub findings: Vec<RiskFinding>,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "                TOKEN SAFETY REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "═══ VERDICT ═══")?;

        let verdict_text = if self.is_honeypot {
            "🔴 HONEYPOT DETECTED".to_string()
        } else {
            format!("{} {}", self.risk_level.emoji(), self.risk_level.as_str())
        };

        writeln!(f, "{}", verdict_text)?;
        writeln!(f, "Safety Score: {}/100", self.safety_score)?;
        writeln!(f, "Confidence: {:.0}%", self.confidence * 100.0)?;

        let sources: Vec<&str> = self.sources_checked.iter().map(|s| s.label()).collect();
        writeln!(
            f,
            "Sources: {}",
            if sources.is_empty() { "none".to_string() } else { sources.join(", ") }
        )?;

        writeln!(f)?;
        writeln!(f, "═══ BREAKDOWN ═══")?;
        for category in Category::ALL {
            writeln!(f, "{:<16} {:?}", format!("{:?}", category), self.breakdown.label(category))?;
        }
        writeln!(f, "Red flags: {}", self.breakdown.red_flags)?;
        writeln!(
            f,
            "Basic checks: {}",
            if self.breakdown.passed_basic_checks { "passed" } else { "not passed" }
        )?;

        if !self.findings.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ WARNINGS ═══")?;
            for finding in &self.findings {
                writeln!(
                    f,
                    "{} [{:?}] {}",
                    finding.severity.emoji(),
                    finding.category,
                    finding.message
                )?;
            }
        } else if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ WARNINGS ═══")?;
            for warning in &self.warnings {
                writeln!(f, "⚠️  {}", warning)?;
            }
        }

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ RECOMMENDATIONS ═══")?;
            for recommendation in &self.recommendations {
                writeln!(f, "• {}", recommendation)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;

        Ok(())
    }
}
