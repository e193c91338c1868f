//! Extract command - read label fields from a single OCR transcript.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use medlabel_core::{
    ExpiryStatus, ExtractionResult, LabelCandidates, LabelExtractor, LabelField, LabelParser,
    MedlabelConfig, RuleBasedParser,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR transcript file, or "-" to read from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include every pattern hit per field (JSON only)
    #[arg(long)]
    candidates: bool,

    /// Reference day for the expiry status, YYYY-MM-DD (default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Exit with an error if the medicine has expired
    #[arg(long)]
    fail_on_expired: bool,
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

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// What the CLI prints for one transcript.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelReport {
    #[serde(flatten)]
    pub label: ExtractionResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_status: Option<ExpiryStatus>,

    pub missing_fields: Vec<LabelField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<LabelCandidates>,
}

impl LabelReport {
    pub fn new(label: ExtractionResult, today: NaiveDate, config: &MedlabelConfig) -> Self {
        let expiry_status = label.expiry_status(today, config.expiry.warning_days);
        let missing_fields = label.missing_fields();
        Self {
            label,
            expiry_status,
            missing_fields,
            candidates: None,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let text = read_input(&args.input)?;

    info!("Extracting label fields from {}", args.input.display());

    let parser = RuleBasedParser::from_config(&config.extraction);
    let parsed = parser.parse(&text);
    for warning in &parsed.warnings {
        debug!("{}", warning);
    }

    let today = args.today.unwrap_or_else(today_local);
    let mut report = LabelReport::new(parsed.label, today, &config);
    if args.candidates {
        report.candidates = Some(parser.extract_candidates(&text));
    }

    let output = format_report(&report, args.format, &args.input.display().to_string())?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.fail_on_expired {
        if let Some(status @ ExpiryStatus::Expired { .. }) = report.expiry_status {
            anyhow::bail!("Medicine {}", status);
        }
    }

    Ok(())
}

pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

pub fn format_report(
    report: &LabelReport,
    format: OutputFormat,
    source: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report, source),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &LabelReport, source: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "source",
        "medicine_name",
        "batch_number",
        "manufacture_date",
        "expiry_date",
        "expiry_status",
    ])?;

    let label = &report.label;
    wtr.write_record([
        source,
        label.medicine_name.as_deref().unwrap_or_default(),
        label.batch_number.as_deref().unwrap_or_default(),
        &label.manufacture_date.map(|d| d.to_string()).unwrap_or_default(),
        &label.expiry_date.map(|d| d.to_string()).unwrap_or_default(),
        &report.expiry_status.map(|s| s.to_string()).unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &LabelReport) -> String {
    let label = &report.label;
    let missing = "(not found)".to_string();
    let mut output = String::new();

    output.push_str(&format!(
        "Medicine:     {}\n",
        label.medicine_name.as_ref().unwrap_or(&missing)
    ));
    output.push_str(&format!(
        "Batch:        {}\n",
        label.batch_number.as_ref().unwrap_or(&missing)
    ));
    output.push_str(&format!(
        "Manufactured: {}\n",
        label.manufacture_date.map(|d| d.to_string()).unwrap_or_else(|| missing.clone())
    ));
    output.push_str(&format!(
        "Expires:      {}\n",
        label.expiry_date.map(|d| d.to_string()).unwrap_or_else(|| missing.clone())
    ));

    if let Some(status) = report.expiry_status {
        output.push_str(&format!("Status:       {}\n", status));
    }

    if !report.missing_fields.is_empty() {
        let names: Vec<String> = report.missing_fields.iter().map(|f| f.to_string()).collect();
        output.push_str(&format!("\nPlease confirm manually: {}\n", names.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str) -> LabelReport {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        LabelReport::new(medlabel_core::extract(text), today, &MedlabelConfig::default())
    }

    #[test]
    fn test_json_report() {
        let r = report("Crocin\nExp: 03/04/2025");
        let json: serde_json::Value =
            serde_json::from_str(&format_report(&r, OutputFormat::Json, "-").unwrap()).unwrap();

        assert_eq!(json["expiryDate"], "2025-04-03");
        assert_eq!(json["medicineName"], "Crocin");
        assert_eq!(json["expiryStatus"]["status"], "valid");
        assert_eq!(json["expiryStatus"]["daysLeft"], 78);
        assert_eq!(
            json["missingFields"],
            serde_json::json!(["manufactureDate", "batchNumber"])
        );
        assert!(json.get("candidates").is_none());
    }

    #[test]
    fn test_csv_report() {
        let r = report("Batch No: Z9\nEXP 10/01/2025");
        let csv = format_report(&r, OutputFormat::Csv, "label.txt").unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "source,medicine_name,batch_number,manufacture_date,expiry_date,expiry_status"
        );
        assert_eq!(lines[1], "label.txt,,Z9,,2025-01-10,expired 5 day(s) ago");
    }

    #[test]
    fn test_text_report_lists_missing_fields() {
        let r = report("Aspirin");
        let text = format_report(&r, OutputFormat::Text, "-").unwrap();

        assert!(text.contains("Medicine:     Aspirin"));
        assert!(text.contains("Expires:      (not found)"));
        assert!(text.contains(
            "Please confirm manually: expiry date, manufacture date, batch number"
        ));
    }
}
