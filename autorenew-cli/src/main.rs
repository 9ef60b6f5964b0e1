//! `autorenew` command line entry point
//!
//! Loads configuration from the environment (and an optional `.env`), builds
//! the registrar and CRM clients plus the browser automation delegate, and
//! runs one of:
//! - `run`: the full reconciliation pipeline
//! - `toggle`: only the browser delegate, for a given domain list
//! - `reactivate`: only the registrar reactivation, for a given domain list
//!
//! Logs go to stderr; the run summary goes to stdout.

mod adapters;
mod config;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use adapters::{CommandToggler, LogOnlyToggler};
use anyhow::{Context, Result};
use autorenew_core::services::{ReactivationService, RenewalRunService, ServiceContext};
use autorenew_core::types::{
    auto_renew_message, DirectoryOptions, DuplicatePolicy, PageRangePolicy, PhaseTimings,
    QualificationRules, ReactivateDomainRequest, ReactivationReport, ReconcileOptions, RunOptions,
    RunSummary, ToggleOutcome,
};
use autorenew_core::AutoRenewToggler;
use autorenew_provider::{create_deal_provider, create_registrar_provider, DealFieldSchema};
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, TogglerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "autorenew",
    version,
    about = "Turn on registrar auto-renew for every domain the CRM says we bought"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch both directories, reconcile them and act on the result
    Run(RunArgs),
    /// Run only the browser delegate for the given domains
    Toggle(ToggleArgs),
    /// Reactivate the given expired domains through the registrar API
    Reactivate(ReactivateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Compute and print the plan without toggling or reactivating anything
    #[arg(long)]
    dry_run: bool,

    /// Reactivate expired domains through the registrar API
    #[arg(long)]
    reactivate: bool,

    /// Renewal period for reactivations
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    years: u32,

    /// Also fetch the last deal page the CRM reports
    #[arg(long)]
    include_last_deal_page: bool,

    /// Drop repeated domains from the toggle and reactivate lists
    #[arg(long)]
    dedupe: bool,

    /// Registrar page size
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(10..=100))]
    page_size: u32,

    /// Pages fetched at once per directory
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Exit non-zero when any page could not be fetched
    #[arg(long)]
    fail_on_skipped: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ToggleArgs {
    /// Domains to enable auto-renew for
    #[arg(required = true)]
    domains: Vec<String>,
}

#[derive(Args, Debug)]
struct ReactivateArgs {
    /// Renewal period
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    years: u32,

    /// Expired domains to reactivate
    #[arg(required = true)]
    domains: Vec<String>,
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            reactivate: self.reactivate,
            years_to_add: self.years,
            directory: DirectoryOptions {
                registrar_page_size: self.page_size,
                deal_page_range: if self.include_last_deal_page {
                    PageRangePolicy::Inclusive
                } else {
                    PageRangePolicy::ExcludeLast
                },
                fetch_concurrency: self.concurrency,
            },
            rules: QualificationRules::default(),
            reconcile: ReconcileOptions {
                duplicates: if self.dedupe {
                    DuplicatePolicy::Dedupe
                } else {
                    DuplicatePolicy::Allow
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for the summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env loaded: {e}");
    }

    let cli = Cli::parse();

    match dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Command) -> Result<ExitCode> {
    match command {
        Command::Run(args) => run(&args).await,
        Command::Toggle(args) => toggle(&args).await,
        Command::Reactivate(args) => reactivate(&args).await,
    }
}

fn build_toggler(config: &TogglerConfig) -> Result<Arc<dyn AutoRenewToggler>> {
    match &config.command {
        Some(command) => {
            tracing::info!("Browser delegate: {}", command.join(" "));
            Ok(Arc::new(CommandToggler::new(command, config.timeout)?))
        }
        None => Ok(Arc::new(LogOnlyToggler::new())),
    }
}

fn build_context(config: &AppConfig) -> Result<Arc<ServiceContext>> {
    tracing::debug!("Configuration: {config:?}");

    let registrar = create_registrar_provider(config.registrar.clone(), config.registrar_options());
    let deals = create_deal_provider(
        config.deals.clone(),
        DealFieldSchema::default(),
        config.deal_options(),
    );
    let toggler = build_toggler(&config.toggler)?;

    Ok(Arc::new(ServiceContext::new(registrar, deals, toggler)))
}

fn load_config() -> Result<AppConfig> {
    AppConfig::from_env().context("Invalid configuration")
}

async fn run(args: &RunArgs) -> Result<ExitCode> {
    let ctx = build_context(&load_config()?)?;
    let options = args.options();

    tracing::info!(
        "Starting auto-renew run{}",
        if options.dry_run { " (dry run)" } else { "" }
    );
    let summary = RenewalRunService::new(ctx).run(&options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if args.fail_on_skipped && summary.is_degraded() {
        tracing::error!(
            "{} page(s) could not be fetched",
            summary.skipped_pages.len()
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn toggle(args: &ToggleArgs) -> Result<ExitCode> {
    let config = TogglerConfig::from_env().context("Invalid configuration")?;
    let toggler = build_toggler(&config)?;

    let started = Instant::now();
    let outcome = toggler.run_auto_renew_toggle(&args.domains).await?;
    let secs = started.elapsed().as_secs_f64();

    print_toggle_outcome(&outcome);
    println!("{}", toggle_result_line(Some(&outcome), secs));

    Ok(if outcome.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn reactivate(args: &ReactivateArgs) -> Result<ExitCode> {
    let ctx = build_context(&load_config()?)?;
    let requests: Vec<ReactivateDomainRequest> = args
        .domains
        .iter()
        .map(|domain| ReactivateDomainRequest {
            years_to_add: args.years,
            ..ReactivateDomainRequest::new(domain.as_str())
        })
        .collect();

    let report = ReactivationService::new(ctx)
        .reactivate_all(&requests)
        .await?;
    print_reactivation_report(&report);

    Ok(if report.failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ============ Summary printing ============

fn print_list(label: &str, names: &[String]) {
    println!("{label} ({}):", names.len());
    for name in names {
        println!("  {name}");
    }
}

/// Closing line of a toggle phase.
///
/// A simulated outcome changed nothing, so it is reported as pending work
/// rather than as renewals.
fn toggle_result_line(outcome: Option<&ToggleOutcome>, secs: f64) -> String {
    match outcome {
        Some(outcome) if outcome.simulated => format!(
            "Auto-renew not performed: {} domain(s) would be toggled (no toggle command configured)",
            outcome.attempted
        ),
        Some(outcome) => auto_renew_message(outcome.succeeded(), secs),
        None => auto_renew_message(0, secs),
    }
}

fn print_toggle_outcome(outcome: &ToggleOutcome) {
    if outcome.simulated {
        println!("Auto-renew toggle: {} would toggle, none changed", outcome.attempted);
        return;
    }
    println!(
        "Auto-renew toggle: {} attempted, {} failed",
        outcome.attempted,
        outcome.failures.len()
    );
    for failure in &outcome.failures {
        println!("  {}: {}", failure.domain, failure.reason);
    }
}

fn print_reactivation_report(report: &ReactivationReport) {
    println!(
        "Reactivation: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    for result in &report.succeeded {
        match result.charged_amount {
            Some(amount) => println!("  {} (charged {amount:.2})", result.domain_name),
            None => println!("  {}", result.domain_name),
        }
    }
    for failure in &report.failed {
        println!("  {}: {}", failure.domain, failure.error);
    }
}

fn print_summary(summary: &RunSummary) {
    let rejections = &summary.rejections;

    println!("Run started {}", summary.started_at.to_rfc3339());
    println!("Domains fetched:  {}", summary.domains_fetched);
    println!("Qualifying deals: {}", summary.deals_qualified);
    println!(
        "Rejected deals:   {} (red status {}, no domain {}, other channel {}, no purchase date {})",
        rejections.total(),
        rejections.red_status,
        rejections.missing_domain,
        rejections.purchase_channel_mismatch,
        rejections.missing_purchase_date
    );

    if !summary.skipped_pages.is_empty() {
        println!("Skipped pages ({}):", summary.skipped_pages.len());
        for skipped in &summary.skipped_pages {
            println!("  {} page {}: {}", skipped.source, skipped.page, skipped.reason);
        }
    }

    print_list("To toggle", &summary.plan.toggle_list());
    print_list("To reactivate", &summary.plan.reactivate_list());

    if summary.dry_run {
        println!("Dry run: no changes made");
        return;
    }

    if let Some(outcome) = &summary.toggle {
        print_toggle_outcome(outcome);
    }
    if let Some(report) = &summary.reactivation {
        print_reactivation_report(report);
    }

    let timings = &summary.timings;
    println!(
        "Timings: registrar {:.1}s, deals {:.1}s, toggle {:.1}s, reactivation {:.1}s",
        timings.fetch_registrar_secs,
        timings.fetch_deals_secs,
        timings.toggle_secs,
        timings.reactivation_secs
    );
    println!("{}", run_closing_line(summary.toggle.as_ref(), timings));
}

/// The browser phase alone is timed here; fetching is reported above.
fn run_closing_line(toggle: Option<&ToggleOutcome>, timings: &PhaseTimings) -> String {
    toggle_result_line(toggle, timings.toggle_secs)
}
