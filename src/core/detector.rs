use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use ethers::types::Address;
use serde::Serialize;
use crate::config::chains;
use crate::core::{HoneypotSource, OnchainSource};
use crate::models::{HoneypotSourceRecord, OnchainSourceRecord, Verdict};
use crate::scoring::Aggregator;
use crate::utils::{CheckError, Result};

const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(15);

/// Token identity echoed back with the verdict
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfo {
    pub address: String,
    pub chain_id: u64,
    pub chain_name: &'static str,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Verdict plus the raw source data it was computed from
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub token: TokenInfo,
    pub verdict: Verdict,
    pub honeypot: Option<HoneypotSourceRecord>,
    pub onchain: Option<OnchainSourceRecord>,
    pub processing_time_ms: u64,
}

/// Fetches both sources concurrently and aggregates whatever came back.
pub struct TokenSafetyChecker {
    honeypot: Arc<dyn HoneypotSource>,
    onchain: Arc<dyn OnchainSource>,
    aggregator: Aggregator,
    timeout: Duration,
}

impl TokenSafetyChecker {
    pub fn new(honeypot: Arc<dyn HoneypotSource>, onchain: Arc<dyn OnchainSource>) -> Self {
        Self {
            honeypot,
            onchain,
            aggregator: Aggregator::default(),
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Per-source timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check a token. Only an unsupported chain is an error; source failures
    /// lower confidence instead.
    pub async fn check(&self, token: Address, chain_id: u64) -> Result<TokenReport> {
        if !self.onchain.supports_chain(chain_id) {
            return Err(CheckError::UnsupportedChain(chain_id));
        }

        let started = Instant::now();
        tracing::info!("🔍 Analyzing token {:?} on chain {}", token, chain_id);

        let (honeypot, onchain) = tokio::join!(
            self.bounded(self.honeypot.name(), self.honeypot.fetch(token, chain_id)),
            self.bounded(self.onchain.name(), self.onchain.inspect(token, chain_id)),
        );

        let honeypot = honeypot.ok();
        let onchain = onchain.ok();

        let verdict = self
            .aggregator
            .aggregate_records(honeypot.as_ref(), onchain.as_ref());

        let processing_time_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            "✅ Analysis complete in {}ms: score={} level={} honeypot={} confidence={:.0}%",
            processing_time_ms,
            verdict.safety_score,
            verdict.risk_level.as_str(),
            verdict.is_honeypot,
            verdict.confidence * 100.0
        );

        let name = honeypot
            .as_ref()
            .and_then(|r| r.token_name.clone())
            .or_else(|| onchain.as_ref().and_then(|r| r.name.clone()));
        let symbol = honeypot
            .as_ref()
            .and_then(|r| r.token_symbol.clone())
            .or_else(|| onchain.as_ref().and_then(|r| r.symbol.clone()));

        Ok(TokenReport {
            token: TokenInfo {
                address: format!("{:?}", token),
                chain_id,
                chain_name: chains::name(chain_id),
                name,
                symbol,
            },
            verdict,
            honeypot,
            onchain,
            processing_time_ms,
        })
    }

    async fn bounded<T>(
        &self,
        source_name: &'static str,
        fetch: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => {
                tracing::warn!("Source '{}' failed: {}", source_name, e);
                Err(e)
            }
            Err(_) => {
                let e = CheckError::Timeout {
                    source_name,
                    secs: self.timeout.as_secs(),
                };
                tracing::warn!("Source '{}' failed: {}", source_name, e);
                Err(e)
            }
        }
    }
}
