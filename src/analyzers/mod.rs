pub mod honeypot_api;
pub mod onchain_analyzer;

pub use honeypot_api::HoneypotApiClient;
pub use onchain_analyzer::OnchainAnalyzer;
