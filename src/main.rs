use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use token_safety_check::analyzers::{HoneypotApiClient, OnchainAnalyzer};
use token_safety_check::config::{chains, Config};
use token_safety_check::*;

/// Token Safety Check - honeypot, tax and contract risk analysis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Token contract address to check
    #[arg(value_name = "TOKEN_ADDRESS")]
    token: String,

    /// Chain ID (1, 56, 137, 42161, 10, 8453, 43114)
    #[arg(short, long, default_value_t = 1)]
    chain_id: u64,

    /// RPC URL override for the selected chain
    #[arg(short, long, env = "TOKEN_SAFETY_RPC_URL")]
    rpc: Option<String>,

    /// TOML config file
    #[arg(long, env = "TOKEN_SAFETY_CONFIG")]
    config: Option<PathBuf>,

    /// Per-source timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// honeypot.is API base URL
    #[arg(long)]
    honeypot_api: Option<String>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "token_safety_check=debug"
    } else {
        "token_safety_check=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(rpc) = &args.rpc {
        config.sources.rpc_urls.insert(args.chain_id.to_string(), rpc.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.sources.timeout_secs = secs;
    }
    if let Some(url) = &args.honeypot_api {
        config.sources.honeypot_api_url = url.clone();
    }

    let token: ethers::types::Address = args
        .token
        .parse()
        .map_err(|_| CheckError::InvalidAddress(args.token.clone()))?;

    let timeout = config.sources.timeout();
    let honeypot = HoneypotApiClient::new(config.sources.honeypot_api_url.clone(), timeout)?;
    let onchain = OnchainAnalyzer::new(config.sources.clone());

    let checker = TokenSafetyChecker::new(Arc::new(honeypot), Arc::new(onchain))
        .with_aggregator(Aggregator::new(config.scoring.clone()))
        .with_timeout(timeout);

    let report = match checker.check(token, args.chain_id).await {
        Ok(report) => report,
        Err(CheckError::UnsupportedChain(id)) => {
            eprintln!(
                "❌ Chain ID {} is not supported. Supported chains: {:?}",
                id,
                chains::supported_ids()
            );
            std::process::exit(3);
        }
        Err(e) => return Err(e),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n🛡️  Token Safety Check");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        println!("🎯 Token: {}", report.token.address);
        if let (Some(name), Some(symbol)) = (&report.token.name, &report.token.symbol) {
            println!("🏷️  {} ({})", name, symbol);
        }
        println!("🔗 Chain: {} ({})", report.token.chain_name, report.token.chain_id);
        println!("⏱️  {}ms\n", report.processing_time_ms);
        println!("{}", report.verdict);
    }

    // Exit code: 0 = safe/low risk, 1 = honeypot/critical, 2 = medium/high risk
    let code = match report.verdict.risk_level {
        _ if report.verdict.is_honeypot => 1,
        RiskLevel::Critical => 1,
        RiskLevel::HighRisk | RiskLevel::MediumRisk => 2,
        RiskLevel::LowRisk | RiskLevel::Safe => 0,
    };
    std::process::exit(code);
}
