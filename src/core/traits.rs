use async_trait::async_trait;
use ethers::types::Address;
use crate::config::chains;
use crate::models::{HoneypotSourceRecord, OnchainSourceRecord};
use crate::utils::Result;

/// Simulation-based source: taxes, holders, verification, liquidity
#[async_trait]
pub trait HoneypotSource: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    async fn fetch(&self, token: Address, chain_id: u64) -> Result<HoneypotSourceRecord>;
}

/// Direct contract inspection over JSON-RPC
#[async_trait]
pub trait OnchainSource: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    async fn inspect(&self, token: Address, chain_id: u64) -> Result<OnchainSourceRecord>;

    /// Can this source inspect tokens on this chain?
    fn supports_chain(&self, chain_id: u64) -> bool {
        chains::is_supported(chain_id)
    }
}
