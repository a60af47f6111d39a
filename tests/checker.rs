use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use ethers::types::Address;
use token_safety_check::*;

struct StaticHoneypot {
    record: Option<HoneypotSourceRecord>,
    delay: Duration,
}

#[async_trait]
impl HoneypotSource for StaticHoneypot {
    fn name(&self) -> &'static str {
        "static-honeypot"
    }

    async fn fetch(&self, _token: Address, _chain_id: u64) -> Result<HoneypotSourceRecord> {
        tokio::time::sleep(self.delay).await;
        self.record
            .clone()
            .ok_or_else(|| CheckError::MalformedPayload("no data".into()))
    }
}

struct StaticOnchain {
    record: Option<OnchainSourceRecord>,
    delay: Duration,
}

#[async_trait]
impl OnchainSource for StaticOnchain {
    fn name(&self) -> &'static str {
        "static-onchain"
    }

    async fn inspect(&self, _token: Address, _chain_id: u64) -> Result<OnchainSourceRecord> {
        tokio::time::sleep(self.delay).await;
        self.record
            .clone()
            .ok_or_else(|| CheckError::ContractCall("no data".into()))
    }
}

fn honeypot(record: Option<HoneypotSourceRecord>, delay_secs: u64) -> Arc<StaticHoneypot> {
    Arc::new(StaticHoneypot {
        record,
        delay: Duration::from_secs(delay_secs),
    })
}

fn onchain(record: Option<OnchainSourceRecord>, delay_secs: u64) -> Arc<StaticOnchain> {
    Arc::new(StaticOnchain {
        record,
        delay: Duration::from_secs(delay_secs),
    })
}

fn clean_honeypot() -> HoneypotSourceRecord {
    HoneypotSourceRecord {
        buy_tax_percent: Some(0.0),
        sell_tax_percent: Some(0.0),
        contract_verified: Some(true),
        top10_holders_percent: Some(20.0),
        token_name: Some("Wrapped Ether".into()),
        token_symbol: Some("WETH".into()),
        ..Default::default()
    }
}

fn clean_onchain() -> OnchainSourceRecord {
    OnchainSourceRecord {
        is_contract: true,
        is_erc20: true,
        code_size_bytes: 3_124,
        total_supply: "3000000000000000000000000".to_string(),
        decimals: Some(18),
        checks: vec![NamedCheck::new("has_transfer_function", CheckOutcome::Pass)],
        name: Some("WETH9".into()),
        symbol: Some("WETH9".into()),
    }
}

#[tokio::test]
async fn test_both_sources_clean() {
    let checker = TokenSafetyChecker::new(
        honeypot(Some(clean_honeypot()), 0),
        onchain(Some(clean_onchain()), 0),
    );

    let report = checker.check(Address::repeat_byte(0x11), 1).await.unwrap();

    assert_eq!(report.verdict.risk_level, RiskLevel::Safe);
    assert_eq!(report.token.chain_name, "Ethereum");
    assert_eq!(report.token.name.as_deref(), Some("Wrapped Ether"));
    assert_eq!(report.token.symbol.as_deref(), Some("WETH"));
    assert!(report.honeypot.is_some());
    assert!(report.onchain.is_some());
}

#[tokio::test]
async fn test_failed_source_degrades_confidence() {
    let checker = TokenSafetyChecker::new(honeypot(None, 0), onchain(Some(clean_onchain()), 0));

    let report = checker.check(Address::repeat_byte(0x22), 8453).await.unwrap();

    assert_eq!(report.verdict.confidence, 0.6);
    assert!(report.honeypot.is_none());
    assert_eq!(report.verdict.breakdown.tax, RiskLabel::Unknown);
    // Falls back to the on-chain name when the honeypot source is missing.
    assert_eq!(report.token.name.as_deref(), Some("WETH9"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_times_out() {
    let checker = TokenSafetyChecker::new(
        honeypot(Some(clean_honeypot()), 0),
        onchain(Some(clean_onchain()), 60),
    )
    .with_timeout(Duration::from_secs(5));

    let report = checker.check(Address::repeat_byte(0x33), 56).await.unwrap();

    assert!(report.onchain.is_none());
    assert_eq!(report.verdict.confidence, 0.7);
    assert_eq!(report.verdict.breakdown.technical, RiskLabel::Unknown);
    assert!(!report.verdict.sources_checked.contains(&SourceKind::Onchain));
}

#[tokio::test(start_paused = true)]
async fn test_sources_run_concurrently() {
    let checker = TokenSafetyChecker::new(
        honeypot(Some(clean_honeypot()), 4),
        onchain(Some(clean_onchain()), 4),
    )
    .with_timeout(Duration::from_secs(6));

    let started = tokio::time::Instant::now();
    let report = checker.check(Address::repeat_byte(0x44), 137).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(6));
    assert_eq!(report.verdict.confidence, 1.0);
}

#[tokio::test]
async fn test_both_sources_down_still_returns_verdict() {
    let checker = TokenSafetyChecker::new(honeypot(None, 0), onchain(None, 0));

    let report = checker.check(Address::repeat_byte(0x55), 10).await.unwrap();

    assert_eq!(report.verdict.risk_level, RiskLevel::Critical);
    assert_eq!(report.verdict.confidence, 0.1);
    assert_eq!(report.verdict.safety_score, 0);
    assert_eq!(report.token.name, None);
}

#[tokio::test]
async fn test_unsupported_chain_is_rejected() {
    let checker = TokenSafetyChecker::new(
        honeypot(Some(clean_honeypot()), 0),
        onchain(Some(clean_onchain()), 0),
    );

    let err = checker.check(Address::repeat_byte(0x66), 369).await.unwrap_err();
    assert!(matches!(err, CheckError::UnsupportedChain(369)));
}

#[tokio::test]
async fn test_custom_scoring_config() {
    let config = token_safety_check::config::ScoringConfig {
        min_liquidity_usd: 1_000_000.0,
        ..Default::default()
    };
    let hp = HoneypotSourceRecord {
        liquidity_usd: Some(50_000.0),
        ..clean_honeypot()
    };
    let checker = TokenSafetyChecker::new(honeypot(Some(hp), 0), onchain(Some(clean_onchain()), 0))
        .with_aggregator(Aggregator::new(config));

    let report = checker.check(Address::repeat_byte(0x77), 1).await.unwrap();

    assert_eq!(report.verdict.findings[0].id, RuleId::LowLiquidity);
    assert_eq!(report.verdict.safety_score, 90);
}
