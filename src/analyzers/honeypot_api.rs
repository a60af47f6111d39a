//! honeypot.is client
//!
//! The `IsHoneypot` endpoint supplies taxes, the simulator verdict, source
//! verification, proxy detection and pair liquidity. Holder concentration
//! comes from the separate `TopHolders` endpoint; a failure there only leaves
//! the concentration unknown.

use std::time::Duration;
use async_trait::async_trait;
use ethers::types::{Address, U256};
use reqwest::Client;
use serde::Deserialize;
use crate::core::HoneypotSource;
use crate::models::HoneypotSourceRecord;
use crate::utils::{CheckError, Result};

const TOP_HOLDERS_COUNTED: usize = 10;

pub struct HoneypotApiClient {
    http: Client,
    base_url: String,
}

impl HoneypotApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("token-safety-check/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: Address,
        chain_id: u64,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("address", format!("{:?}", token)),
                ("chainID", chain_id.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CheckError::MalformedPayload(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl HoneypotSource for HoneypotApiClient {
    fn name(&self) -> &'static str {
        "honeypot.is"
    }

    async fn fetch(&self, token: Address, chain_id: u64) -> Result<HoneypotSourceRecord> {
        tracing::info!("Querying honeypot.is for {:?} on chain {}", token, chain_id);

        let (report, holders) = tokio::join!(
            self.get_json::<IsHoneypotResponse>("/v2/IsHoneypot", token, chain_id),
            self.get_json::<TopHoldersResponse>("/v1/TopHolders", token, chain_id),
        );

        let mut record = report?.into_record();

        match holders {
            Ok(holders) => record.top10_holders_percent = holders.top_percent(TOP_HOLDERS_COUNTED),
            Err(e) => tracing::debug!("Top holders unavailable: {}", e),
        }

        tracing::info!(
            "honeypot.is: honeypot={} buy_tax={:?} sell_tax={:?}",
            record.is_honeypot,
            record.buy_tax_percent,
            record.sell_tax_percent
        );

        Ok(record)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct IsHoneypotResponse {
    token: Option<ApiToken>,
    honeypot_result: Option<ApiHoneypotResult>,
    simulation_result: Option<ApiSimulation>,
    contract_code: Option<ApiContractCode>,
    pair: Option<ApiPair>,
    holder_analysis: Option<ApiHolderAnalysis>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiToken {
    name: Option<String>,
    symbol: Option<String>,
    total_holders: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiHoneypotResult {
    is_honeypot: bool,
    honeypot_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiSimulation {
    buy_tax: Option<f64>,
    sell_tax: Option<f64>,
    transfer_tax: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiContractCode {
    open_source: Option<bool>,
    root_open_source: Option<bool>,
    is_proxy: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiPair {
    liquidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiHolderAnalysis {
    /// Reported as a decimal string
    holders: Option<String>,
}

impl IsHoneypotResponse {
    pub(crate) fn into_record(self) -> HoneypotSourceRecord {
        let token = self.token.unwrap_or_default();
        let verdict = self.honeypot_result.unwrap_or_default();
        let simulation = self.simulation_result.unwrap_or_default();
        let code = self.contract_code.unwrap_or_default();

        let holder_count = token.total_holders.or_else(|| {
            self.holder_analysis
                .and_then(|h| h.holders)
                .and_then(|h| h.trim().parse().ok())
        });

        // A proxy counts as verified only when its root implementation is too.
        let contract_verified = match (code.open_source, code.root_open_source) {
            (Some(open), Some(root)) => Some(open && root),
            (open, root) => open.or(root),
        };

        HoneypotSourceRecord {
            buy_tax_percent: simulation.buy_tax,
            sell_tax_percent: simulation.sell_tax,
            transfer_tax_percent: simulation.transfer_tax,
            holder_count,
            top10_holders_percent: None,
            contract_verified,
            is_proxy: code.is_proxy,
            liquidity_usd: self.pair.and_then(|p| p.liquidity),
            is_honeypot: verdict.is_honeypot,
            honeypot_reason: verdict.honeypot_reason.filter(|r| !r.trim().is_empty()),
            token_name: token.name,
            token_symbol: token.symbol,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TopHoldersResponse {
    total_supply: String,
    holders: Vec<ApiHolder>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiHolder {
    balance: String,
}

impl TopHoldersResponse {
    /// Share of supply held by the `n` largest holders, in percent with two
    /// decimals of precision.
    pub(crate) fn top_percent(&self, n: usize) -> Option<f64> {
        let total = U256::from_dec_str(&self.total_supply).ok()?;
        if total.is_zero() || self.holders.is_empty() {
            return None;
        }

        let mut balances: Vec<U256> = self
            .holders
            .iter()
            .filter_map(|h| U256::from_dec_str(&h.balance).ok())
            .collect();
        balances.sort_unstable_by(|a, b| b.cmp(a));

        let held = balances
            .into_iter()
            .take(n)
            .fold(U256::zero(), |acc, b| acc.saturating_add(b));

        // Basis points keep integer precision before the float conversion.
        let bps = held.saturating_mul(U256::from(10_000u64)) / total;
        Some(bps.min(U256::from(10_000u64)).as_u64() as f64 / 100.0)
    }
}
