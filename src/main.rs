use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use paytrack::calendar;
use paytrack::config::{Config, LogFormat};
use paytrack::installments::{schedule_total, Contract, DueDateRule, InstallmentCalculator};
use paytrack::money::format_money;

#[derive(Debug, Parser)]
#[command(name = "paytrack")]
#[command(about = "Preview the installment schedule of a contract")]
struct Cli {
    /// Contract total, e.g. 1234.50
    #[arg(long)]
    total: Decimal,

    /// Number of installments
    #[arg(long, allow_negative_numbers = true)]
    count: i64,

    /// Month of the first installment (YYYY-MM-DD or DD/MM/YYYY), defaults to today
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    #[arg(long, default_value = "preview")]
    contract_id: String,

    #[arg(long, default_value = "preview")]
    client_id: String,

    /// Overrides DUE_DATE_RULE (last_business_day or same_day)
    #[arg(long)]
    rule: Option<DueDateRule>,

    /// Print the schedule as JSON
    #[arg(long)]
    json: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    calendar::parse_reference_date(raw).map_err(|e| e.to_string())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("paytrack={}", config.app.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    init_tracing(&config);

    tracing::debug!("Environment: {}", config.app.env);

    let mut billing = config.billing.clone();
    if let Some(rule) = cli.rule {
        billing.due_date_rule = rule;
    }

    let contract = Contract::new(
        cli.contract_id,
        cli.client_id,
        cli.total,
        cli.count,
        cli.start.unwrap_or_else(calendar::today),
    );

    let schedule = InstallmentCalculator::from_config(&billing)
        .calculate_schedule(&contract)
        .with_context(|| format!("Could not build schedule for contract {}", contract.id))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    let symbol = Some(billing.currency_symbol.as_str());
    println!("{:>4}  {:<10}  {:>18}", "#", "due", "amount");
    for installment in &schedule {
        println!(
            "{:>4}  {:<10}  {:>18}",
            installment.installment_number,
            installment.due_date.to_string(),
            format_money(installment.amount, symbol)
        );
    }
    println!(
        "{:>4}  {:<10}  {:>18}",
        "",
        "total",
        format_money(schedule_total(&schedule), symbol)
    );

    Ok(())
}
