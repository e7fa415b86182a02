mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use static_tc_plugin::StaticTcPlugin;
use tenant_context::{DataSources, TenantResolver, TenantSnapshot, TenantStore};
use tenant_context_sdk::{QuotaKind, QuotaUsage};

use crate::config::AppConfig;

/// Tenant context CLI - resolve tenants by hostname and inspect their data
#[derive(Parser)]
#[command(name = "tenant-context-cli")]
#[command(about = "Tenant context CLI - resolve tenants by hostname and inspect their data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tenant a hostname resolves to and how it matched
    Resolve { hostname: String },
    /// Initialize the tenant store for a hostname and print its state
    Show { hostname: String },
    /// Validate configuration and print the effective configuration
    Check,
}

#[derive(Serialize)]
struct QuotaReport {
    products: Option<QuotaUsage>,
    templates: Option<QuotaUsage>,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    hostname: &'a str,
    /// Whether resolution fell back to the built-in default tenant.
    is_default_tenant: bool,
    #[serde(flatten)]
    snapshot: &'a TenantSnapshot,
    quota: QuotaReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.verbose);
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Resolve { hostname } => resolve(config, &hostname).await,
        Commands::Show { hostname } => show(config, &hostname).await,
        Commands::Check => check_config(&config),
    }
}

async fn resolve(config: AppConfig, hostname: &str) -> Result<()> {
    let plugin = StaticTcPlugin::from_config(config.static_tc_plugin)?;
    let resolver = TenantResolver::new(plugin.registry, &config.tenant_context);

    let resolution = resolver
        .resolve(hostname)
        .await
        .with_context(|| format!("failed to resolve '{hostname}'"))?;
    print_json(&resolution)
}

async fn show(config: AppConfig, hostname: &str) -> Result<()> {
    let plugin = StaticTcPlugin::with_default_tenant(
        config.static_tc_plugin,
        &config.tenant_context.default_tenant,
    )?;
    let store = TenantStore::new(
        &config.tenant_context,
        plugin.registry.clone(),
        DataSources::from_shared(&plugin.data),
        plugin.data,
    );

    store.initialize(hostname).await;

    let snapshot = store.snapshot();
    let is_default_tenant = snapshot
        .active_tenant
        .as_ref()
        .is_some_and(|t| t.id == store.default_tenant().id);
    print_json(&ShowReport {
        hostname,
        is_default_tenant,
        snapshot: &snapshot,
        quota: QuotaReport {
            products: snapshot.quota(QuotaKind::Products),
            templates: snapshot.quota(QuotaKind::Templates),
        },
    })
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let plugin = StaticTcPlugin::from_config(config.static_tc_plugin.clone())
        .context("invalid static_tc_plugin configuration")?;
    tracing::info!(
        tenants = plugin.registry.tenants().len(),
        "Tenant registry is valid"
    );

    println!("Configuration is valid");
    print_json(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
