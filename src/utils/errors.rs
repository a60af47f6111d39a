use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Chain ID {0} is not supported")]
    UnsupportedChain(u64),

    #[error("RPC error: {0}")]
    RpcError(#[from] ethers::providers::ProviderError),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("{source_name} timed out after {secs}s")]
    Timeout { source_name: &'static str, secs: u64 },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;
