//! Extract command - read fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use denpyo_core::models::record::DocumentRecord;
use denpyo_core::models::session::{DocumentSession, RecordOverrides};

use super::{build_engine, load_config, read_document_text};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF with a text layer, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Own company name, never reported as the counterparty
    #[arg(long, env = "MY_COMPANY_NAME")]
    self_company: Option<String>,

    /// Replace the extracted document type
    #[arg(long)]
    doc_type: Option<String>,

    /// Replace the extracted counterparty name
    #[arg(long)]
    counterparty: Option<String>,

    /// Replace the extracted issue date (YYMMDD)
    #[arg(long)]
    issue_date: Option<String>,

    /// Replace the extracted total amount
    #[arg(long)]
    total_amount: Option<String>,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// What the extract command reports for one document.
#[derive(Debug, Serialize)]
pub struct ExtractOutput {
    pub source: String,
    pub record: DocumentRecord,
    pub file_name: String,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Reading text...");
    let text = read_document_text(&args.input, &config.pdf)?;

    pb.set_message("Extracting fields...");
    let engine = build_engine(&config, args.self_company.as_deref());
    let result = engine.parse(&text);

    pb.finish_and_clear();

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    } else {
        for warning in &result.warnings {
            warn!("{}", warning);
        }
    }

    let source = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let mut session = DocumentSession::new(source.clone(), result.record);
    session.set_overrides(RecordOverrides {
        doc_type: args.doc_type,
        counterparty_name: args.counterparty,
        issue_date: args.issue_date,
        total_amount: args.total_amount,
    })?;

    let output = ExtractOutput {
        file_name: session.file_name(&config.output.default_extension),
        record: session.effective(),
        source,
    };

    let formatted = format_output(&output, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &formatted)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", formatted);
    }

    debug!(
        "Extraction took {}ms, total {:?}",
        result.processing_time_ms,
        start.elapsed()
    );

    Ok(())
}

pub fn format_output(output: &ExtractOutput, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(output)?),
        OutputFormat::Csv => format_csv([output]),
        OutputFormat::Text => Ok(format_text(output)),
    }
}

/// CSV with one row per document.
pub fn format_csv<'a>(
    outputs: impl IntoIterator<Item = &'a ExtractOutput>,
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "source",
        "doc_type",
        "counterparty_name",
        "issue_date",
        "total_amount",
        "file_name",
    ])?;

    for output in outputs {
        wtr.write_record([
            &output.source,
            &output.record.doc_type,
            &output.record.counterparty_name,
            &output.record.issue_date,
            &output.record.total_amount,
            &output.file_name,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(output: &ExtractOutput) -> String {
    let record = &output.record;
    let mut text = String::new();

    text.push_str(&format!("Source:       {}\n", output.source));
    text.push_str(&format!("Type:         {}\n", record.doc_type));
    text.push_str(&format!("Counterparty: {}\n", record.counterparty_name));
    match record.issue_date_value() {
        Some(date) => text.push_str(&format!("Issue date:   {} ({})\n", record.issue_date, date)),
        None => text.push_str(&format!("Issue date:   {}\n", record.issue_date)),
    }
    match record.total_amount_value() {
        Some(amount) => text.push_str(&format!("Total:        {}円 ({})\n", record.total_amount, amount)),
        None => text.push_str(&format!("Total:        {}\n", record.total_amount)),
    }
    text.push_str(&format!("File name:    {}", output.file_name));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> ExtractOutput {
        ExtractOutput {
            source: "scan.pdf".to_string(),
            record: DocumentRecord {
                doc_type: "見積書".to_string(),
                counterparty_name: "ABC".to_string(),
                issue_date: "230401".to_string(),
                total_amount: "98,000".to_string(),
            },
            file_name: "見積書_ABC_230401.pdf".to_string(),
        }
    }

    #[test]
    fn test_format_csv() {
        let csv = format_output(&output(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "source,doc_type,counterparty_name,issue_date,total_amount,file_name");
        assert_eq!(lines[1], "scan.pdf,見積書,ABC,230401,\"98,000\",見積書_ABC_230401.pdf");
    }

    #[test]
    fn test_format_text() {
        let text = format_output(&output(), OutputFormat::Text).unwrap();
        assert!(text.contains("Issue date:   230401 (2023-04-01)"));
        assert!(text.contains("Total:        98,000円 (98000)"));
        assert!(text.ends_with("File name:    見積書_ABC_230401.pdf"));
    }

    #[test]
    fn test_format_json() {
        let json = format_output(&output(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["record"]["counterparty_name"], "ABC");
        assert_eq!(value["file_name"], "見積書_ABC_230401.pdf");
    }
}
