//! Split off-ramp CLI - entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ramp_app::{AppConfig, Application, OfframpRequest};
use ramp_chain::SplitSpec;
use ramp_core::TokenSymbol;
use rust_decimal::Decimal;
use tracing::info;

/// Split off-ramp: swap stablecoins to a Naira bank payout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RAMP_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote the fiat rate for a token amount
    Rate {
        /// Token symbol (USDC, USDT, CUSD)
        token: String,
        /// Amount to quote
        amount: String,
    },
    /// List payout institutions for the configured currency
    Banks,
    /// Verify a bank account and print the holder name
    Verify {
        /// Account number
        account: String,
        /// Institution code from `banks`
        bank_code: String,
    },
    /// Fetch USD prices for the supported tokens
    Prices,
    /// Run the full off-ramp: create order, transfer, monitor settlement
    Send {
        /// Amount to off-ramp
        amount: String,
        /// Token symbol (USDC, USDT, CUSD)
        token: String,
        /// Account number
        account: String,
        /// Institution code from `banks`
        bank_code: String,
    },
    /// Split-contract operations
    #[command(subcommand)]
    Splits(SplitsCommand),
}

#[derive(Subcommand, Debug)]
enum SplitsCommand {
    /// List splits created by the configured factory
    List,
    /// Create a split contract
    Create {
        /// Token the split distributes (contract address, or zero address)
        #[arg(long)]
        token: String,
        /// Recipient addresses
        #[arg(long, required = true, num_args = 1..)]
        recipients: Vec<String>,
        /// Percent shares, matching recipients; must sum to 100
        #[arg(long, required = true, num_args = 1..)]
        percentages: Vec<Decimal>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    ramp_telemetry::init_logging()?;

    let config_path = args
        .config
        .or_else(|| std::env::var("RAMP_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = AppConfig::load(&config_path)?;
    info!(network = %config.network, "Configuration loaded");

    let app = Application::new(config);

    match args.command {
        Command::Rate { token, amount } => {
            let token = TokenSymbol::new(&token)?;
            match app.quote(&token, &amount).await? {
                Some(quote) => println!(
                    "{} {} ≈ {} {} (rate {})",
                    quote.source_amount,
                    quote.source_token,
                    quote.fiat_value(),
                    app.config().fiat_currency,
                    quote.fiat_rate
                ),
                None => println!("No rate available for that input"),
            }
        }
        Command::Banks => {
            let banks = app.fetch_institutions().await?;
            for bank in banks {
                println!("{}\t{}", bank.code, bank.name);
            }
        }
        Command::Verify { account, bank_code } => {
            match app.verify_account(&account, &bank_code).await? {
                Some(name) => println!("{name}"),
                None => println!("Could not verify account"),
            }
        }
        Command::Prices => {
            for price in app.fetch_prices().await? {
                println!("{}\t{}\t${}", price.symbol, price.name, price.usd_price);
            }
        }
        Command::Send {
            amount,
            token,
            account,
            bank_code,
        } => {
            let wallet = app.connect_wallet()?;
            let flow = app.build_flow(Some(wallet))?;
            let receipt = flow
                .run(&OfframpRequest {
                    token: TokenSymbol::new(&token)?,
                    amount_input: amount,
                    account_identifier: account,
                    institution_code: bank_code,
                })
                .await?;
            let profile = app.config().profile();
            println!("order: {}", receipt.order_id);
            println!(
                "transfer: {}",
                profile.tx_url(&format!("{:#x}", receipt.transfer_tx))
            );
            println!("settlement: {:?}", receipt.outcome);
        }
        Command::Splits(SplitsCommand::List) => {
            let factory = app.split_factory()?;
            let splits = factory.fetch_splits(app.config().network).await?;
            if splits.is_empty() {
                println!("No splits created yet");
            }
            for split in splits {
                println!("{split}");
            }
        }
        Command::Splits(SplitsCommand::Create {
            token,
            recipients,
            percentages,
        }) => {
            let factory = app.split_factory()?;
            let spec = SplitSpec {
                token: token
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid token address {token:?}"))?,
                recipients: recipients
                    .iter()
                    .map(|r| {
                        r.parse()
                            .map_err(|_| anyhow::anyhow!("invalid recipient address {r:?}"))
                    })
                    .collect::<Result<Vec<_>>>()?,
                percentages,
            };
            let tx_hash = factory.create_split(app.config().network, &spec).await?;
            println!("created: {tx_hash:#x}");
        }
    }

    Ok(())
}
