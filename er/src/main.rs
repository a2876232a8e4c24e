//! EventRisk - risk and budget decision engine
//!
//! CLI entry point for analyzing plan snapshots and optimizing vendor budgets.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use eventrisk::cli::{Cli, Command, OutputFormat};
use eventrisk::config::Config;
use eventrisk::{
    AdvisorySynthesizer, BudgetOptimizer, CalendarEvent, InMemoryCatalog, OpenWeatherProvider, PlanSnapshot,
    RemovalPriority, RiskAnalyzer, RiskReport, SelectionResult, Severity, VendorCatalog, WeatherSignal,
    fetch_signal_or_fallback, read_document,
};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventrisk")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("eventrisk.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Analyze {
            snapshot,
            weather,
            fetch_weather,
            events,
            advise,
            format,
        } => cmd_analyze(&config, snapshot, weather, fetch_weather, events, advise, format).await,
        Command::Optimize { catalog, budget, format } => cmd_optimize(&config, catalog, budget, format),
        Command::Weather { date } => {
            let signal = fetch_weather_signal(&config, date).await?;
            println!("{}", serde_yaml::to_string(&signal)?);
            Ok(())
        }
        Command::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

async fn cmd_analyze(
    config: &Config,
    snapshot_path: PathBuf,
    weather_path: Option<PathBuf>,
    fetch_weather: bool,
    events_path: Option<PathBuf>,
    advise: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut snapshot = PlanSnapshot::load(&snapshot_path)
        .context(format!("Failed to load snapshot {}", snapshot_path.display()))?;

    if let Some(path) = weather_path {
        let signal: WeatherSignal = read_document(&path).context("Failed to load weather signal")?;
        snapshot.weather = Some(signal);
    } else if fetch_weather {
        snapshot.weather = Some(fetch_weather_signal(config, snapshot.plan.date).await?);
    }

    let selection_cost = snapshot.selection_cost(&snapshot.selected_vendors);
    if (selection_cost - snapshot.plan.estimated_cost()).abs() >= 1.0 {
        warn!(
            estimated = %snapshot.plan.estimated_cost(),
            %selection_cost,
            "Snapshot estimated cost differs from the selected vendors' prices"
        );
    }

    if let Some(path) = events_path {
        let events: Vec<CalendarEvent> = read_document(&path).context("Failed to load calendar events")?;
        snapshot.events = events;
    }

    let report = RiskAnalyzer::from_config(config).analyze(&snapshot.risk_input());
    let advisories = if advise {
        AdvisorySynthesizer::new().synthesize(&report)
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "plan": snapshot.plan.id,
                "risks": report,
                "advisories": advisories,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print_report(&snapshot.plan.name, &report);
            for advisory in &advisories {
                println!();
                println!("{} {}", severity_badge(advisory.priority), advisory.title.bold());
                println!("  {}", advisory.description);
                for action in &advisory.action_items {
                    println!("  - {}", action);
                }
            }
        }
    }
    Ok(())
}

fn cmd_optimize(config: &Config, catalog_path: PathBuf, budget: f64, format: OutputFormat) -> Result<()> {
    let catalog = InMemoryCatalog::load(&catalog_path)
        .context(format!("Failed to load catalog {}", catalog_path.display()))?;
    let priority = RemovalPriority::new(config.budget.removal_priority.clone())?;

    let result = BudgetOptimizer::new(priority).optimize(catalog.vendors(), budget);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_selection(&catalog, &result, budget, &config.currency),
    }
    Ok(())
}

async fn fetch_weather_signal(config: &Config, date: Option<chrono::NaiveDate>) -> Result<WeatherSignal> {
    let provider = OpenWeatherProvider::from_config(&config.weather).context("Failed to create weather provider")?;
    let timeout = Duration::from_millis(config.weather.timeout_ms);
    Ok(fetch_signal_or_fallback(&provider, date, timeout).await)
}

fn severity_badge(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "HIGH  ".red().bold(),
        Severity::Medium => "MEDIUM".yellow().bold(),
        Severity::Low => "LOW   ".green(),
    }
}

fn print_report(plan_name: &str, report: &RiskReport) {
    if !plan_name.is_empty() {
        println!("Risk report: {}", plan_name.cyan());
    }
    for item in report {
        println!("{} {:<14} {}", severity_badge(item.severity), item.risk_type.to_string().dimmed(), item.title);
        println!("         {}", item.description);
        if let Some(mitigation) = &item.mitigation {
            println!("         {} {}", "→".cyan(), mitigation);
        }
    }
    println!(
        "{} high, {} medium, {} low",
        report.count(Severity::High),
        report.count(Severity::Medium),
        report.count(Severity::Low)
    );
}

fn print_selection(catalog: &dyn VendorCatalog, result: &SelectionResult, budget: f64, currency: &str) {
    for selection in &result.selections {
        let name = catalog
            .get(&selection.vendor_id)
            .map(|v| v.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(selection.vendor_id.as_str());
        let alternatives = catalog.available(selection.category).len().saturating_sub(1);
        println!(
            "{:<14} {} ({}, {} alternative(s))",
            selection.category.to_string().dimmed(),
            name.cyan(),
            eventrisk::money::format_amount(selection.price, currency),
            alternatives
        );
    }
    for category in &result.removed {
        println!("{:<14} {}", category.to_string().dimmed(), "removed".yellow());
    }
    let total = eventrisk::money::format_amount(result.total_cost, currency);
    let budget = eventrisk::money::format_amount(budget, currency);
    if result.within_budget {
        println!("{} Total {} within budget {}", "✓".green(), total, budget);
    } else {
        println!("{} Total {} exceeds budget {}", "✗".red(), total, budget);
    }
}
