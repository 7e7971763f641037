use anyhow::Context;
use bill_split::app::commands::{load_json, receipt_to_request, split_bill};
use bill_split::app::{render_summary, OutputFormat};
use bill_split::config::Command;
use bill_split::domain::model::{AddItemRequest, CreateBillRequest};
use bill_split::domain::ports::ReceiptVerifier;
use bill_split::utils::{logger, validation::Validate};
use bill_split::{
    AppConfig, BillNormalizer, BillService, CliConfig, FiscalCheckClient, InMemoryBillStore,
    ReceiptTextExtractor, SplitError,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_format == "json" {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting bill-split CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        let exit_code = match e.downcast_ref::<SplitError>() {
            Some(err) => {
                tracing::error!(
                    "❌ bill-split failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());

                err.severity().exit_code()
            }
            None => {
                tracing::error!("❌ bill-split failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };

        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            AppConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?
        }
        None => AppConfig::default(),
    };
    config.validate()?;

    let default_format: OutputFormat = config.output.format.parse()?;
    let store = Arc::new(InMemoryBillStore::new());
    let service = BillService::new(
        store,
        BillNormalizer::new(&config.defaults.currency, &config.defaults.created_by),
    );

    match cli.command {
        Command::Split(args) => {
            let request: CreateBillRequest = load_json(&args.bill)
                .with_context(|| format!("Failed to read bill request '{}'", args.bill.display()))?;

            let mut additions = Vec::with_capacity(args.add_items.len());
            for path in &args.add_items {
                let addition: AddItemRequest = load_json(path)
                    .with_context(|| format!("Failed to read item '{}'", path.display()))?;
                additions.push(addition);
            }

            let summary = split_bill(&service, request, additions)?;
            let format = match args.format {
                Some(f) => f.parse()?,
                None => default_format,
            };
            println!("{}", render_summary(&summary, format)?);
        }
        Command::Receipt(args) => {
            let text = std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read receipt '{}'", args.file.display()))?;
            let receipt = ReceiptTextExtractor::new(&config.defaults.currency).extract(&text);
            tracing::info!(
                "🧾 Extracted {} items, total {:.2} {}",
                receipt.items.len(),
                receipt.total,
                receipt.currency
            );

            if args.participants.is_empty() {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
                return Ok(());
            }

            let title = args.title.clone().unwrap_or_else(|| {
                args.file
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Receipt".to_string())
            });
            let request = receipt_to_request(&receipt, &title, &args.participants, args.tip);
            let summary = split_bill(&service, request, Vec::new())?;
            let format = match args.format {
                Some(f) => f.parse()?,
                None => default_format,
            };
            println!("{}", render_summary(&summary, format)?);
        }
        Command::Verify(args) => {
            let client = FiscalCheckClient::new(config.verification.clone());
            let response = client.verify(&args.into()).await?;

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
