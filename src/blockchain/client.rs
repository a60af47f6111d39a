use ethers::prelude::*;
use std::sync::Arc;
use crate::config::chains;
use crate::utils::{Result, CheckError};

/// Blockchain RPC client bound to one chain
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    chain_id: u64,
}

impl BlockchainClient {
    /// Create a client for a chain whose id is already known; no network call.
    pub fn for_chain(rpc_url: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| CheckError::RpcError(
                ProviderError::CustomError(format!("Invalid RPC URL: {}", e))
            ))?;

        Ok(Self {
            provider: Arc::new(provider),
            chain_id,
        })
    }

    /// Create a client and ask the node which chain it serves
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let mut client = Self::for_chain(rpc_url, 0)?;
        let chain_id = client.provider.get_chainid().await?;

        tracing::info!("Connected to chain ID: {}", chain_id);

        client.chain_id = chain_id.as_u64();
        Ok(client)
    }

    pub fn provider(&self) -> Arc<Provider<Http>> {
        self.provider.clone()
    }

    /// Deployed code at address; empty for externally owned accounts
    pub async fn get_code(&self, address: Address) -> Result<Vec<u8>> {
        tracing::debug!("Fetching bytecode for {:?}", address);

        let code = self.provider.get_code(address, None).await?;
        Ok(code.to_vec())
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn chain_name(&self) -> &'static str {
        chains::name(self.chain_id)
    }
}
