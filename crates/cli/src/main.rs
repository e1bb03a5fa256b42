mod config;
mod error;
mod quick_add;

use chrono::Local;
use clap::{Parser, Subcommand};
use client::HttpBackend;
use engine::{
    Asset, AssetKind, Category, Currency, EngineError, FieldUpdate, FormState, MetalUnit, Money,
    Orchestrator, PartySel, SubmitOutcome,
};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{CliError, Result};

#[derive(Debug, Parser)]
#[command(name = "gruzzolo")]
#[command(about = "Record financial flows against a gruzzolo server")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override the API token.
    #[arg(long, global = true)]
    token: Option<String>,
    /// Override the quick-add currency (USD, EUR or KRW).
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tracked assets.
    Assets,
    /// Record a one-line flow: `-12.50 coffee #wallet`, `+100 salary`, `r 5.20`.
    Add {
        /// Sign prefix, amount, optional note, optional `#asset` account tag.
        line: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let overrides = config::Overrides {
        config: cli.config,
        base_url: cli.base_url,
        token: cli.token,
        currency: cli.currency,
    };
    let settings = match config::load(overrides) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "gruzzolo_cli={level},client={level},engine={level}",
            level = settings.level
        ))
        .init();

    if let Err(err) = run(cli.command, settings).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(command: Command, settings: AppConfig) -> Result<()> {
    let currency = Currency::try_from(settings.currency.as_str())
        .map_err(|_| CliError::Usage(format!("unsupported currency: {}", settings.currency)))?;
    let backend = HttpBackend::new(reqwest::Client::new(), settings.base_url, settings.token);

    match command {
        Command::Assets => list_assets(&backend).await,
        Command::Add { line } => add(&line, currency, backend).await,
    }
}

async fn list_assets(backend: &HttpBackend) -> Result<()> {
    let mut assets = backend.assets().await?;
    if assets.is_empty() {
        println!("No assets yet.");
        return Ok(());
    }

    assets.sort_by(|a, b| a.name.cmp(&b.name));
    for asset in &assets {
        println!(
            "{:<24} {:<12} {}",
            asset.name,
            asset.kind.as_str(),
            describe_balance(asset)
        );
    }
    Ok(())
}

fn describe_balance(asset: &Asset) -> String {
    if asset.kind.is_holding() {
        let ticker = asset.ticker.as_deref().unwrap_or("-");
        return format!("{:.4} units ({ticker})", asset.balance);
    }
    if asset.kind == AssetKind::Metal {
        let unit = asset.unit.unwrap_or(MetalUnit::Gram);
        return format!("{:.4} {}", asset.balance, unit.as_str());
    }
    Money::from_major_f64(asset.balance, asset.currency).format(asset.currency)
}

async fn add(line: &str, currency: Currency, backend: HttpBackend) -> Result<()> {
    let parsed = quick_add::parse(line, currency).map_err(CliError::Usage)?;
    debug!(category = parsed.category.as_str(), "quick-add parsed");

    let assets = backend.assets().await?;
    let today = Local::now().date_naive();

    let mut form = FormState::for_category(parsed.category, &assets, today);
    form.apply(FieldUpdate::Amount(Some(parsed.amount)), &assets);
    if let Some(name) = &parsed.asset {
        let account = find_asset(&assets, name)?;
        let picked = PartySel::Asset(account.id);
        // An expense spends from the tagged account; income and refunds land in it.
        if parsed.category == Category::Expense {
            form.apply(FieldUpdate::Source(picked), &assets);
        } else {
            form.apply(FieldUpdate::Destination(picked), &assets);
        }
    }
    if let Some(note) = parsed.note {
        form.apply(FieldUpdate::Note(Some(note)), &assets);
    }

    let orchestrator = Orchestrator::new(backend);
    match orchestrator.submit(&form, &assets, today).await {
        Ok(SubmitOutcome::Committed { message, .. }) => {
            println!("{message}");
            Ok(())
        }
        // Quick-add never schedules, so no start choice can be pending.
        Ok(SubmitOutcome::StartChoiceNeeded { next_occurrence }) => {
            println!("Nothing recorded; next occurrence would be {next_occurrence}.");
            Ok(())
        }
        Err(EngineError::Validation(errors)) => {
            eprintln!("The entry is incomplete:");
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}

fn find_asset<'a>(assets: &'a [Asset], name: &str) -> Result<&'a Asset> {
    let wanted = name.trim().to_lowercase();
    assets
        .iter()
        .find(|asset| {
            asset.name.trim().to_lowercase() == wanted
                || asset
                    .ticker
                    .as_deref()
                    .is_some_and(|ticker| ticker.trim().to_lowercase() == wanted)
        })
        .ok_or_else(|| CliError::Usage(format!("no asset named '{name}'")))
}
