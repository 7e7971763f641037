use crate::domain::model::FiscalReceiptQuery;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bill-split")]
#[command(about = "Split a shared bill, allocating tip by what each participant consumed")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "compact", value_parser = ["compact", "json"])]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a bill from a JSON request and print its split
    Split(SplitArgs),
    /// Extract items from receipt text, optionally splitting them among participants
    Receipt(ReceiptArgs),
    /// Check a fiscal receipt against the verification service
    Verify(VerifyArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SplitArgs {
    /// JSON file with the bill creation request
    #[arg(long)]
    pub bill: PathBuf,

    /// JSON files with items to append after creation
    #[arg(long = "add-item")]
    pub add_items: Vec<PathBuf>,

    /// Override the output format from config
    #[arg(long, value_parser = ["json", "csv", "table"])]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ReceiptArgs {
    /// Plain text receipt
    #[arg(long)]
    pub file: PathBuf,

    /// Participant names sharing every extracted item
    #[arg(long = "participant")]
    pub participants: Vec<String>,

    /// Tip percentage
    #[arg(long, default_value_t = 0.0)]
    pub tip: f64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = ["json", "csv", "table"])]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Fiscal drive number
    #[arg(long = "fn")]
    pub fiscal_drive: String,

    /// Fiscal document number
    #[arg(long)]
    pub fd: String,

    /// Fiscal sign
    #[arg(long)]
    pub fp: String,

    /// Receipt timestamp, e.g. 20190402T1352
    #[arg(long)]
    pub t: String,

    /// Receipt sum
    #[arg(long)]
    pub s: String,

    /// Operation type
    #[arg(long, default_value = "")]
    pub n: String,
}

impl From<VerifyArgs> for FiscalReceiptQuery {
    fn from(args: VerifyArgs) -> Self {
        FiscalReceiptQuery {
            r#fn: args.fiscal_drive,
            fd: args.fd,
            fp: args.fp,
            t: args.t,
            s: args.s,
            n: args.n,
        }
    }
}
