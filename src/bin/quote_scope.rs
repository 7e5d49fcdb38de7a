//! Estimate a price for a scope record stored as JSON.
//!
//! Uses the Postgres audit store when DATABASE_URL is set, otherwise an
//! in-memory store (the estimate is then audited only for the lifetime of
//! the process).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use quoteforge::{
    AuditStore, BadgeLevel, DatabaseConfig, MemoryAuditStore, PgAuditStore, PricingConfig,
    PricingEngine, ScopeRecord,
};

#[derive(Parser, Debug)]
#[command(about = "Estimate a price for a freelance project scope")]
struct Args {
    /// Path to a JSON scope record.
    scope_file: PathBuf,

    /// Actor recorded in the audit entry.
    #[arg(long, default_value = "cli")]
    actor: String,

    /// Also print the price for this badge level (low/medium/high).
    #[arg(long)]
    badge: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quoteforge=info")),
        )
        .init();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.scope_file)
        .with_context(|| format!("reading {}", args.scope_file.display()))?;
    let scope: ScopeRecord = serde_json::from_str(&raw).context("parsing scope record")?;

    let store: Arc<dyn AuditStore> = if std::env::var("DATABASE_URL").is_ok() {
        let config = DatabaseConfig::from_env()?;
        let store = PgAuditStore::new(&config).await?;
        store.run_migrations().await?;
        Arc::new(store)
    } else {
        tracing::warn!("DATABASE_URL not set, auditing in memory only");
        Arc::new(MemoryAuditStore::new())
    };

    let engine = PricingEngine::new(PricingConfig::default(), store);
    let estimate = engine.estimate(&scope, &args.actor).await?;

    println!("{}", estimate.breakdown.render());
    println!();
    println!("Entry:    {}", estimate.final_tiers.entry);
    println!("Standard: {}", estimate.final_tiers.standard);
    println!("Premium:  {}", estimate.final_tiers.premium);
    println!();
    println!(
        "BPV {} | TWU {} | MP {} | audit entry {}",
        estimate.bpv, estimate.twu, estimate.mp, estimate.audit_entry_id
    );

    if let Some(label) = &args.badge {
        let badge = BadgeLevel::from_label(label);
        println!("Badge price ({badge:?}): {}", estimate.price_for_badge(badge));
    }

    Ok(())
}
