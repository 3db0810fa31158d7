use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use finance_report_engine::engine::{build_report, CategoryFilter, Report, ReportQuery, TimeWindow, TypeRestriction};
use finance_report_engine::ingest::load_transactions;
use finance_report_engine::types::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json
}

/// Summarize a transaction export into totals, category and monthly breakdowns.
#[derive(Debug, Parser)]
#[command(name = "finance-report", version)]
struct Cli {
    /// Transactions file, `.json` for a JSON array, anything else is read as CSV
    input: PathBuf,
    /// `all`, or the number of months to look back (1, 3, 6 or 12)
    #[arg(long, default_value = "all")]
    window: TimeWindow,
    /// `all`, or an exact category label
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    /// Types counted in the category breakdown: any, income or expense
    #[arg(long = "types", default_value = "expense")]
    type_restriction: TypeRestriction,
    /// Only report transactions owned by this id or email
    #[arg(long)]
    owner: Option<String>,
    /// Reporting date the window is measured from (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Emit a row for every month in range, including months without activity
    #[arg(long)]
    fill_gaps: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let timer = Instant::now();
    let outcome = load_transactions(&cli.input).await?;

    if outcome.skipped > 0 {
        warn!("Skipped {} unusable records in {}", outcome.skipped, cli.input.display());
    }

    let mut transactions = outcome.transactions;

    if let Some(owner) = &cli.owner {
        transactions.retain(|transaction| {
            transaction.owner_id.as_deref() == Some(owner.as_str())
                || transaction.owner_email.as_deref() == Some(owner.as_str())
        });
    }

    let query = ReportQuery {
        time_window: cli.window,
        category_filter: cli.category.clone(),
        type_restriction: cli.type_restriction,
        fill_gaps: cli.fill_gaps
    };
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let report = build_report(&transactions, &query, today);

    info!("Built report over {} transactions in: {:?}", transactions.len(), timer.elapsed());

    write_report_to_stdout(&report, cli.format)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout, so logging stays on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &Report, format: OutputFormat) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, report)?;
            writeln!(output)?;
        }
        OutputFormat::Text => write_text_report(&mut output, report)?
    }

    output.flush()?;

    Ok(())
}

fn write_text_report(output: &mut impl Write, report: &Report) -> Result<()> {
    writeln!(output, "income,expense,balance")?;
    writeln!(
        output,
        "{},{},{}",
        format_amount(report.summary.total_income),
        format_amount(report.summary.total_expense),
        format_amount(report.summary.balance)
    )?;

    writeln!(output)?;
    writeln!(output, "category,total,count")?;

    for (category, total) in report.categories.ranked() {
        writeln!(output, "{},{},{}", category, format_amount(total.total), total.count)?;
    }

    writeln!(output)?;
    writeln!(output, "month,income,expense,net,balance")?;

    for (totals, point) in report.monthly.iter().zip(&report.running_balance) {
        writeln!(
            output,
            "{},{},{},{},{}",
            totals.month,
            format_amount(totals.income_total),
            format_amount(totals.expense_total),
            format_amount(point.net),
            format_amount(point.balance)
        )?;
    }

    Ok(())
}
