use crate::domain::model::BillSummary;
use crate::utils::error::{Result, SplitError};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
}

impl FromStr for OutputFormat {
    type Err = SplitError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            other => Err(SplitError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Allowed values: json, csv, table".to_string(),
            }),
        }
    }
}

pub fn render_summary(summary: &BillSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Csv => render_csv(summary),
        OutputFormat::Table => Ok(render_table(summary)),
    }
}

fn render_csv(summary: &BillSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["participant_id", "participant_name", "subtotal", "tip_share", "total"])?;

    for split in &summary.split {
        writer.write_record([
            split.participant_id.clone(),
            split.participant_name.clone(),
            format!("{:.2}", split.subtotal),
            format!("{:.2}", split.tip_share),
            format!("{:.2}", split.total),
        ])?;
    }

    // 帳單層級的總計列
    writer.write_record([
        String::new(),
        "TOTAL".to_string(),
        format!("{:.2}", summary.subtotal),
        format!("{:.2}", summary.tip_amount),
        format!("{:.2}", summary.grand_total),
    ])?;

    let bytes = writer.into_inner().map_err(|e| SplitError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SplitError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn render_table(summary: &BillSummary) -> String {
    let name_width = summary
        .split
        .iter()
        .map(|s| s.participant_name.chars().count())
        .chain(std::iter::once("Participant".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>10}  {:>10}  {:>10}",
        "Participant", "Subtotal", "Tip", "Total"
    );
    for split in &summary.split {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>10.2}  {:>10.2}  {:>10.2}",
            split.participant_name, split.subtotal, split.tip_share, split.total
        );
    }
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>10.2}  {:>10.2}  {:>10.2}  {}",
        "TOTAL", summary.subtotal, summary.tip_amount, summary.grand_total, summary.currency
    );
    out
}
