use async_trait::async_trait;
use ethers::types::{Address, U256};
use crate::blockchain::BlockchainClient;
use crate::config::{chains, SourcesConfig};
use crate::contracts::{IERC20, REQUIRED_SELECTORS};
use crate::core::OnchainSource;
use crate::models::{CheckOutcome, NamedCheck, OnchainSourceRecord};
use crate::utils::{CheckError, Result};

/// Inspects a token contract directly over JSON-RPC
pub struct OnchainAnalyzer {
    sources: SourcesConfig,
}

impl OnchainAnalyzer {
    pub fn new(sources: SourcesConfig) -> Self {
        Self { sources }
    }

    fn client_for(&self, chain_id: u64) -> Result<BlockchainClient> {
        let rpc_url = self
            .sources
            .rpc_url(chain_id)
            .ok_or(CheckError::UnsupportedChain(chain_id))?;
        BlockchainClient::for_chain(&rpc_url, chain_id)
    }
}

#[async_trait]
impl OnchainSource for OnchainAnalyzer {
    fn name(&self) -> &'static str {
        "on-chain"
    }

    async fn inspect(&self, token: Address, chain_id: u64) -> Result<OnchainSourceRecord> {
        let client = self.client_for(chain_id)?;

        tracing::info!("Inspecting {:?} on {}", token, client.chain_name());

        let code = client.get_code(token).await?;
        if code.is_empty() {
            tracing::warn!("{:?} has no deployed code", token);
            return Ok(OnchainSourceRecord::not_a_contract());
        }

        let erc20 = IERC20::new(token, client.provider());
        let total_supply_call = erc20.total_supply();
        let balance_of_call = erc20.balance_of(Address::zero());
        let decimals_call = erc20.decimals();
        let name_call = erc20.name();
        let symbol_call = erc20.symbol();

        let (total_supply, balance_of, decimals, name, symbol) = tokio::join!(
            total_supply_call.call(),
            balance_of_call.call(),
            decimals_call.call(),
            name_call.call(),
            symbol_call.call(),
        );

        if let Err(e) = &total_supply {
            tracing::debug!("totalSupply() failed: {}", e);
        }

        let record = build_record(
            &code,
            ViewCalls {
                total_supply: total_supply.ok(),
                balance_of_ok: balance_of.is_ok(),
                decimals: decimals.ok(),
                name: name.ok(),
                symbol: symbol.ok(),
            },
        );

        tracing::info!(
            "On-chain inspection complete: {} bytes, erc20={}, {} failed checks",
            record.code_size_bytes,
            record.is_erc20,
            record.failed_checks().count()
        );

        Ok(record)
    }

    fn supports_chain(&self, chain_id: u64) -> bool {
        chains::is_supported(chain_id) || self.sources.rpc_urls.contains_key(&chain_id.to_string())
    }
}

const TRANSFER_CHECK: &str = "has_transfer_function";

/// Results of the read-only ERC20 calls
#[derive(Debug, Default)]
pub(crate) struct ViewCalls {
    pub total_supply: Option<U256>,
    pub balance_of_ok: bool,
    pub decimals: Option<u8>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Derive the on-chain record from deployed code and view-call results.
///
/// When the ERC20 view calls answer but none of the standard selectors are in
/// the bytecode, the logic sits behind a delegate and selector checks are
/// reported as unknown instead of failed.
pub(crate) fn build_record(code: &[u8], calls: ViewCalls) -> OnchainSourceRecord {
    let code_hex = hex::encode_upper(code);

    let present: Vec<bool> = REQUIRED_SELECTORS
        .iter()
        .map(|(_, selector)| code_hex.contains(selector))
        .collect();
    let delegated = !present.iter().any(|&p| p) && calls.total_supply.is_some();

    let mut checks: Vec<NamedCheck> = REQUIRED_SELECTORS
        .iter()
        .zip(&present)
        .map(|((name, _), &found)| {
            let outcome = if found {
                CheckOutcome::Pass
            } else if delegated {
                CheckOutcome::Unknown
            } else {
                CheckOutcome::Fail
            };
            NamedCheck::new(*name, outcome)
        })
        .collect();

    checks.push(NamedCheck::new(
        "total_supply_readable",
        CheckOutcome::from(Some(calls.total_supply.is_some())),
    ));
    checks.push(NamedCheck::new(
        "decimals_readable",
        CheckOutcome::from(Some(calls.decimals.is_some())),
    ));

    let transfer_ok = checks
        .iter()
        .find(|c| c.name == TRANSFER_CHECK)
        .is_some_and(|c| c.outcome != CheckOutcome::Fail);
    let is_erc20 = calls.total_supply.is_some() && calls.balance_of_ok && transfer_ok;

    OnchainSourceRecord {
        is_contract: true,
        is_erc20,
        code_size_bytes: code.len() as u64,
        total_supply: calls.total_supply.unwrap_or_default().to_string(),
        decimals: calls.decimals,
        checks,
        name: calls.name,
        symbol: calls.symbol,
    }
}
