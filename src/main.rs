use airdrop_sentinel::chain::FixtureChain;
use airdrop_sentinel::metadata::{CoinGeckoPriceResolver, TokenMetadataResolver};
use airdrop_sentinel::rules::{load_rules, JsonFileRuleStore, RuleStore, StaticRuleStore};
use airdrop_sentinel::*;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Solana airdrop eligibility and past-airdrop detection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a wallet against every active campaign
    Check {
        /// JSON wallet snapshot to read chain data from
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Campaign export to use instead of AIRDROP_RULES_FILE or the built-in list
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Ask each campaign's provider instead of checking profile attributes
        #[arg(long)]
        live: bool,
    },
    /// Scan a wallet's transaction history for received airdrops
    History {
        /// JSON wallet snapshot to read chain data from
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if args.verbose {
        "airdrop_sentinel=debug"
    } else {
        "airdrop_sentinel=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env()?;
    let client = config.http_client()?;

    match args.command {
        Command::Check { snapshot, rules, live } => {
            let chain = Arc::new(FixtureChain::from_file(&snapshot)?);
            let wallet = chain.address().to_string();

            let store: Box<dyn RuleStore> = match rules.or_else(|| config.rules_file.clone()) {
                Some(path) => Box::new(JsonFileRuleStore::new(path)),
                None => Box::new(StaticRuleStore::default()),
            };
            let rules = load_rules(store.as_ref()).await;

            tracing::info!("🔍 Checking {} against {} campaigns", wallet, rules.len());

            let evaluator = AirdropEvaluator::with_client(client.clone());
            let evaluations = if live {
                evaluator.evaluate_live(&wallet, &rules).await
            } else {
                let metadata = TokenMetadataResolver::new(client, &config).with_chain(chain.clone());
                let profile = build_wallet_profile(
                    chain.as_ref(),
                    &metadata,
                    &wallet,
                    config.profile_signature_limit,
                    chrono::Utc::now().timestamp(),
                )
                .await?;
                evaluator.evaluate_profile(&profile, &rules)
            };

            for evaluation in &evaluations {
                tracing::info!(
                    "{} {}: {:?} ({}%)",
                    evaluation.claim_safety.grade.emoji(),
                    evaluation.project,
                    evaluation.status,
                    evaluation.confidence
                );
            }

            print_json(&evaluations)
        }
        Command::History { snapshot } => {
            let chain = Arc::new(FixtureChain::from_file(&snapshot)?);
            let wallet = chain.address().to_string();

            let metadata = TokenMetadataResolver::new(client.clone(), &config).with_chain(chain.clone());
            let prices = CoinGeckoPriceResolver::new(client, &config);
            let scanner = HistoryScanner::new(chain, Arc::new(metadata), Arc::new(prices), &config);

            let report = scanner.scan(&wallet).await?;
            print_json(&report)
        }
    }
}
